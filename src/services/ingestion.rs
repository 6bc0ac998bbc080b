use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use serde_json::Value;

use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::domain::{DatasetMeta, RecordResponse, ScoreRecord};

pub struct IngestionService {
    cache: Cache,
}

impl IngestionService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(config.cache.cache_dir)?,
        })
    }

    pub fn run(&self, input: &Path) -> Result<()> {
        info!("=== Starting Data Ingestion ===\n");

        // Step 1: Read and archive the raw feed
        let payload = self.read_feed(input)?;
        self.cache.save_raw("dataset", &payload)?;
        info!("  → Archived raw feed from {}\n", input.display());

        // Step 2: Coerce duck-typed rows into validated records
        let records = self.coerce_records(payload)?;
        info!("  → Coerced {} valid records\n", records.len());

        // Step 3: Stamp and save the dataset
        let meta = self.build_meta(records.len());
        self.cache.save_parsed("records", &records)?;
        self.cache.save_parsed("meta", &meta)?;
        info!("  → Saved dataset version {}\n", meta.version);

        info!("=== Ingestion Complete ===");
        Ok(())
    }

    fn read_feed(&self, input: &Path) -> Result<Value> {
        let json = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read feed file: {}", input.display()))?;
        serde_json::from_str(&json).context("Feed file is not valid JSON")
    }

    fn coerce_records(&self, payload: Value) -> Result<Vec<ScoreRecord>> {
        let rows: Vec<RecordResponse> =
            serde_json::from_value(payload).context("Feed is not an array of score records")?;

        let total = rows.len();
        let records: Vec<ScoreRecord> = rows.iter().filter_map(RecordResponse::to_record).collect();

        let skipped = total - records.len();
        if skipped > 0 {
            warn!("  Skipped {skipped} of {total} rows that failed coercion");
        }

        Ok(records)
    }

    fn build_meta(&self, record_count: usize) -> DatasetMeta {
        let ingested_at = Utc::now();
        DatasetMeta {
            version: format!("{}-{}", ingested_at.format("%Y%m%d%H%M%S"), record_count),
            ingested_at,
            record_count,
        }
    }
}

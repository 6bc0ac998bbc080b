use anyhow::{anyhow, Result};
use log::info;

use crate::cache::{Cache, Versioned};
use crate::config::settings::AppConfig;
use crate::domain::{DatasetMeta, ScoreRecord};
use crate::engine::{compute_cohort_stats, compute_industry_averages};

/// Computes the read-mostly statistics tables over the full dataset. Both
/// tables are selection-independent by design and only change when a new
/// dataset version is ingested.
pub struct ProcessingService {
    config: AppConfig,
    cache: Cache,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let cache = Cache::new(config.cache.cache_dir)?;
        Ok(Self { config, cache })
    }

    pub fn run(&self) -> Result<()> {
        info!("=== Starting Statistics Processing ===\n");

        let (records, meta) = self.load_dataset()?;
        info!("  → Loaded {} records (dataset version {})\n", records.len(), meta.version);

        let cohort_stats = compute_cohort_stats(&records, &self.config.stats);
        self.cache
            .save_parsed("cohort_stats", &Versioned::new(&meta.version, cohort_stats))?;
        info!("  → Saved cohort statistics table\n");

        let industry_averages = compute_industry_averages(&records);
        self.cache
            .save_parsed("industry_averages", &Versioned::new(&meta.version, industry_averages))?;
        info!("  → Saved industry averages table\n");

        info!("=== Processing Complete ===");
        Ok(())
    }

    fn load_dataset(&self) -> Result<(Vec<ScoreRecord>, DatasetMeta)> {
        let records = self
            .cache
            .load_parsed("records")?
            .ok_or_else(|| anyhow!("No ingested records in cache. Run `ingest` first."))?;
        let meta = self
            .cache
            .load_parsed("meta")?
            .ok_or_else(|| anyhow!("No dataset metadata in cache. Run `ingest` first."))?;
        Ok((records, meta))
    }
}

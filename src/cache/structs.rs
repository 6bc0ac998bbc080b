use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A derived table stamped with the dataset version it was computed from,
/// so a `compare` run can detect tables that predate the latest ingest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub version: String,
    pub data: T,
}

impl<T> Versioned<T> {
    pub fn new(version: impl Into<String>, data: T) -> Self {
        Self { version: version.into(), data }
    }
}

/// File-based cache for dataset artifacts with a two-tier layout: `raw/`
/// keeps the upstream feed payload verbatim, `parsed/` keeps the typed
/// records and derived statistics tables.
pub struct Cache {
    raw_dir: PathBuf,
    parsed_dir: PathBuf,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        let raw_dir = cache_dir.join("raw");
        let parsed_dir = cache_dir.join("parsed");

        fs::create_dir_all(&raw_dir).context("Failed to create raw cache directory")?;
        fs::create_dir_all(&parsed_dir).context("Failed to create parsed cache directory")?;

        Ok(Self { raw_dir, parsed_dir })
    }

    /// Archive the raw feed payload as received.
    pub fn save_raw(&self, key: &str, data: &Value) -> Result<()> {
        let file_path = self.build_raw_path(key);
        self.write_json(&file_path, data)?;
        info!("Saved raw data to cache: {}", file_path.display());
        Ok(())
    }

    pub fn load_raw(&self, key: &str) -> Result<Option<Value>> {
        self.read_json_opt(&self.build_raw_path(key))
    }

    /// Save a typed artifact to the parsed tier.
    pub fn save_parsed<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = self.build_parsed_path(key);
        self.write_json(&file_path, data)?;
        info!("Saved parsed data to cache: {}", file_path.display());
        Ok(())
    }

    pub fn load_parsed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        self.read_json_opt(&self.build_parsed_path(key))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.build_parsed_path(key).exists()
    }

    // --- Helper Methods ---

    fn build_raw_path(&self, key: &str) -> PathBuf {
        self.raw_dir.join(format!("{key}.json"))
    }

    fn build_parsed_path(&self, key: &str) -> PathBuf {
        self.parsed_dir.join(format!("{key}.json"))
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(path, json).context("Failed to write cache file")?;
        Ok(())
    }

    fn read_json_opt<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path)?;
        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                path,
                &json[..json.len().min(200)]
            )
        })?;
        Ok(Some(data))
    }
}

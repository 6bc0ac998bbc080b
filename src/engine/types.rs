use std::collections::HashMap;
use serde::{Deserialize, Serialize};

pub type CountryCode = String;
pub type Year = i32;
pub type NormalizedKey = String;

/// Per-country, per-year descriptive statistics over the full market cohort.
pub type CohortStatsMap = HashMap<CountryCode, HashMap<Year, CohortStats>>;

/// year -> normalized industry -> average score, over the full dataset.
pub type IndustryAverages = HashMap<Year, HashMap<NormalizedKey, f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortStats {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

impl CohortStats {
    /// A cohort with fewer than 2 contributing brands has no meaningful
    /// spread; callers must not standardize against it.
    pub fn is_valid(&self) -> bool {
        self.count >= 2
    }
}

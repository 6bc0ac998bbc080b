use serde::{Deserialize, Serialize};

use super::types::CohortStats;

/// How a raw score is expressed in chart output. The product runs both
/// policies at once: brand-level charts stay raw while country-comparison
/// charts standardize, so the mode is an explicit parameter at every call
/// site rather than a hard-coded choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    Raw,
    Standardized,
}

/// Express a raw score in standard-deviation units relative to its cohort.
///
/// Returns `None` when the cohort fails the validity gate; callers must
/// render that as a gap, never as zero, so a missing basis is not mistaken
/// for an at-average result.
pub fn standardize(raw_score: f64, cohort: &CohortStats) -> Option<f64> {
    if !cohort.is_valid() || cohort.std_dev <= 0.0 {
        return None;
    }
    Some((raw_score - cohort.mean) / cohort.std_dev)
}

/// Apply the requested scoring mode to one raw score.
pub fn score_for_mode(raw_score: f64, cohort: Option<&CohortStats>, mode: ScoreMode) -> Option<f64> {
    match mode {
        ScoreMode::Raw => Some(raw_score),
        ScoreMode::Standardized => cohort.and_then(|c| standardize(raw_score, c)),
    }
}

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::countries;
use crate::engine::normalizer::normalize_name;
use crate::engine::types::{CountryCode, NormalizedKey, Year};

/// One brand's sustainability score in one country in one year.
///
/// This is the validated shape the engine computes over; all upstream type
/// looseness is resolved by [`RecordResponse::to_record`] at ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub brand: String,
    /// Canonical upper-case market code ("SE", "NO", ...).
    pub country: CountryCode,
    pub industry: String,
    pub year: Year,
    pub score: Option<f64>,
    /// Forward-looking estimate rather than an observed survey value.
    pub is_projected: bool,
}

impl ScoreRecord {
    pub fn brand_key(&self) -> NormalizedKey {
        normalize_name(&self.brand)
    }

    pub fn industry_key(&self) -> NormalizedKey {
        normalize_name(&self.industry)
    }

    /// Whether this record contributes to cohort statistics. Zero is the
    /// feed's other spelling of "not scored", so it is excluded too.
    pub fn has_score(&self) -> bool {
        self.score.is_some_and(|s| s != 0.0)
    }
}

/// Metadata stamped on an ingested dataset. Derived tables carry the same
/// version string so stale caches are detectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub version: String,
    pub ingested_at: DateTime<Utc>,
    pub record_count: usize,
}

// --- Raw feed structures ---

/// A field the feed serializes as either a JSON number or a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) => Some(*n),
            NumberOrText::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Raw row shape from the upstream record source. Fields arrive with mixed
/// types and casing; nothing here is trusted until coerced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResponse {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub year: Option<NumberOrText>,
    #[serde(default)]
    pub score: Option<NumberOrText>,
    #[serde(rename = "isProjected", default)]
    pub is_projected: Option<bool>,
}

impl RecordResponse {
    /// Coerce the raw row into a validated [`ScoreRecord`].
    ///
    /// Rows without a usable brand, resolvable country or integer year are
    /// dropped with a warning; a missing or unparsable score is kept as
    /// `None` because "present but unscored" is meaningful downstream.
    pub fn to_record(&self) -> Option<ScoreRecord> {
        let brand = self.brand.as_deref().map(str::trim).unwrap_or_default();
        if brand.is_empty() {
            warn!("Skipping record without a brand name");
            return None;
        }

        let country_raw = self.country.as_deref().unwrap_or_default();
        let Some(country) = countries::canonical_code(country_raw) else {
            warn!("Skipping record for '{brand}': unknown country '{country_raw}'");
            return None;
        };

        let year = self.year.as_ref().and_then(NumberOrText::as_f64);
        let Some(year) = year.map(|y| y as Year) else {
            warn!("Skipping record for '{brand}' in {country}: unparsable year");
            return None;
        };

        Some(ScoreRecord {
            brand: brand.to_string(),
            country: country.to_string(),
            industry: self
                .industry
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            year,
            score: self.score.as_ref().and_then(NumberOrText::as_f64),
            is_projected: self.is_projected.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> RecordResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_coerces_string_year_and_score() {
        let record = response(
            r#"{"brand": "IKEA", "country": "sweden", "industry": "Furniture",
                "year": "2021", "score": "73.4", "isProjected": true}"#,
        )
        .to_record()
        .unwrap();

        assert_eq!(record.country, "SE");
        assert_eq!(record.year, 2021);
        assert_eq!(record.score, Some(73.4));
        assert!(record.is_projected);
    }

    #[test]
    fn test_coerces_numeric_fields_and_defaults() {
        let record = response(r#"{"brand": "Arla", "country": "DK", "year": 2020, "score": 61}"#)
            .to_record()
            .unwrap();

        assert_eq!(record.year, 2020);
        assert_eq!(record.score, Some(61.0));
        assert!(!record.is_projected);
        assert_eq!(record.industry, "");
    }

    #[test]
    fn test_rejects_unusable_rows() {
        assert!(response(r#"{"country": "SE", "year": 2020}"#).to_record().is_none());
        assert!(response(r#"{"brand": "X", "country": "Mars", "year": 2020}"#)
            .to_record()
            .is_none());
        assert!(response(r#"{"brand": "X", "country": "SE", "year": "soon"}"#)
            .to_record()
            .is_none());
    }

    #[test]
    fn test_null_score_is_kept_as_none() {
        let record = response(r#"{"brand": "X", "country": "SE", "year": 2020, "score": null}"#)
            .to_record()
            .unwrap();
        assert_eq!(record.score, None);
        assert!(!record.has_score());
    }

    #[test]
    fn test_zero_score_does_not_count_as_scored() {
        let record = response(r#"{"brand": "X", "country": "SE", "year": 2020, "score": 0}"#)
            .to_record()
            .unwrap();
        assert!(!record.has_score());
    }
}

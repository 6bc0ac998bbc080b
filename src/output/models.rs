use serde::Serialize;

use crate::engine::resolver::MatchMode;
use crate::engine::series::BrandSeries;
use crate::engine::standardize::ScoreMode;
use crate::engine::types::Year;

/// Chart-ready payload for the comparison panel. Field names are camelCase
/// because the dashboard consumes these files directly.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResponse {
    pub dataset_version: String,
    pub countries: Vec<String>,
    pub match_mode: MatchMode,
    pub score_mode: ScoreMode,
    pub brands: Vec<MatchPayload>,
    pub series: Vec<SeriesPayload>,
}

/// One resolved cross-market brand with its representative score per market.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPayload {
    pub key: String,
    pub display_name: String,
    pub via_fallback: bool,
    pub markets: Vec<MarketScorePayload>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketScorePayload {
    pub country: String,
    pub country_name: Option<String>,
    pub year: Year,
    pub score: Option<f64>,
    pub projected: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPayload {
    pub key: String,
    pub brand: String,
    pub country: String,
    pub via_fallback: bool,
    pub points: Vec<SeriesPointPayload>,
}

/// `value: null` is a deliberate gap; the chart renders a broken line.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPointPayload {
    pub year: Year,
    pub value: Option<f64>,
    pub projected: bool,
}

impl From<&BrandSeries> for SeriesPayload {
    fn from(series: &BrandSeries) -> Self {
        Self {
            key: series.key.clone(),
            brand: series.brand.clone(),
            country: series.country.clone(),
            via_fallback: series.via_fallback,
            points: series
                .points
                .iter()
                .map(|p| SeriesPointPayload {
                    year: p.year,
                    value: p.value,
                    projected: p.projected,
                })
                .collect(),
        }
    }
}

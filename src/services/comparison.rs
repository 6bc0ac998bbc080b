use std::collections::HashSet;

use anyhow::{anyhow, bail, Result};
use colored::Colorize;
use log::{info, warn};

use crate::cache::{Cache, Versioned};
use crate::config::settings::AppConfig;
use crate::config::{brands, countries};
use crate::domain::{DatasetMeta, ScoreRecord};
use crate::engine::normalizer::normalize_name;
use crate::engine::resolver::{resolve, CrossMarketMatch, MatchMode};
use crate::engine::series::assemble;
use crate::engine::standardize::ScoreMode;
use crate::engine::types::CohortStatsMap;
use crate::output::{ComparisonResponse, MarketScorePayload, MatchPayload, SeriesPayload};

#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    /// Country codes or names as typed on the command line.
    pub countries: Vec<String>,
    /// Optional explicit brand selection; `None` compares everything resolved.
    pub brands: Option<Vec<String>>,
    pub match_mode: MatchMode,
    pub score_mode: ScoreMode,
}

pub struct ComparisonService {
    config: AppConfig,
    cache: Cache,
}

impl ComparisonService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let cache = Cache::new(config.cache.cache_dir)?;
        Ok(Self { config, cache })
    }

    pub fn run(&self, request: &ComparisonRequest) -> Result<()> {
        info!("=== Starting Cross-Market Comparison ===\n");

        let selection = self.canonicalize_countries(&request.countries);
        let (records, meta) = self.load_dataset()?;
        let cohort_stats = self.load_cohort_stats(&meta)?;

        let mut matches = resolve(
            &selection,
            &records,
            request.match_mode,
            &self.config.resolver,
            &brands::fallback_brands(),
        );
        if let Some(selected_brands) = &request.brands {
            let wanted: HashSet<String> =
                selected_brands.iter().map(|b| normalize_name(b)).collect();
            matches.retain(|m| wanted.contains(&m.key));
        }
        info!("  → Resolved {} comparable brands\n", matches.len());

        let series = assemble(&matches, &selection, &records, &cohort_stats, request.score_mode);
        info!("  → Assembled {} chart series\n", series.len());

        let response = ComparisonResponse {
            dataset_version: meta.version.clone(),
            countries: selection,
            match_mode: request.match_mode,
            score_mode: request.score_mode,
            brands: matches.iter().map(to_match_payload).collect(),
            series: series.iter().map(SeriesPayload::from).collect(),
        };
        self.cache.save_parsed("comparison", &response)?;

        print_summary(&response);

        info!("=== Comparison Complete ===");
        Ok(())
    }

    /// Resolve the typed country labels to canonical codes, dropping
    /// unknowns with a warning. An empty result is valid input downstream
    /// and yields an empty comparison rather than an error.
    fn canonicalize_countries(&self, raw: &[String]) -> Vec<String> {
        let mut selection = Vec::new();
        for label in raw {
            match countries::canonical_code(label) {
                Some(code) if !selection.iter().any(|c| c == code) => {
                    selection.push(code.to_string());
                }
                Some(_) => {}
                None => warn!("Unknown country '{label}', skipping"),
            }
        }
        selection
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

    fn load_cohort_stats(&self, meta: &DatasetMeta) -> Result<CohortStatsMap> {
        let table: Versioned<CohortStatsMap> = self
            .cache
            .load_parsed("cohort_stats")?
            .ok_or_else(|| anyhow!("No cohort statistics in cache. Run `process` first."))?;

        if table.version != meta.version {
            bail!(
                "Cohort statistics were computed for dataset {} but the cache holds {}. Run `process` again.",
                table.version,
                meta.version
            );
        }
        Ok(table.data)
    }
}

fn to_match_payload(brand_match: &CrossMarketMatch) -> MatchPayload {
    let mut markets: Vec<MarketScorePayload> = brand_match
        .records
        .iter()
        .map(|(country, record)| MarketScorePayload {
            country: country.clone(),
            country_name: countries::country_name(country).map(str::to_string),
            year: record.year,
            score: record.score,
            projected: record.is_projected,
        })
        .collect();
    markets.sort_by(|a, b| a.country.cmp(&b.country));

    MatchPayload {
        key: brand_match.key.clone(),
        display_name: brand_match.display_name.clone(),
        via_fallback: brand_match.via_fallback,
        markets,
    }
}

fn print_summary(response: &ComparisonResponse) {
    println!();
    println!(
        "{} {}",
        "Cross-market comparison:".bold(),
        response.countries.join(", ").cyan()
    );

    if response.brands.is_empty() {
        println!("{}", "No comparable brands found for this selection.".yellow());
        return;
    }

    for brand in &response.brands {
        let scores: Vec<String> = brand
            .markets
            .iter()
            .map(|m| {
                let score = m
                    .score
                    .map(|s| format!("{s:.1}"))
                    .unwrap_or_else(|| "n/a".to_string());
                format!("{} {}", m.country, score)
            })
            .collect();

        let label = if brand.via_fallback {
            format!("{} {}", brand.display_name.green(), "(curated)".dimmed())
        } else {
            brand.display_name.green().to_string()
        };
        println!("  {label}: {}", scores.join(" | "));
    }
}

use std::collections::HashMap;

use log::{debug, info};

use super::resolver::challenger_wins;
use super::types::{IndustryAverages, NormalizedKey, Year};
use crate::domain::ScoreRecord;

/// Compute the per-(industry, year) average score over the full dataset.
///
/// This table is the comparison baseline for every chart and is deliberately
/// decoupled from the user's brand and country selection: a benchmark that
/// moved when a brand was added to the comparison view would be meaningless.
/// A brand appearing more than once per (year, industry) in the raw feed is
/// deduplicated first (highest score wins) so it cannot skew the mean.
pub fn compute_industry_averages(records: &[ScoreRecord]) -> IndustryAverages {
    let mut representatives: HashMap<(NormalizedKey, Year, NormalizedKey), &ScoreRecord> =
        HashMap::new();

    for record in records {
        if !record.has_score() {
            continue;
        }
        let industry = record.industry_key();
        if industry.is_empty() {
            continue;
        }

        representatives
            .entry((record.brand_key(), record.year, industry))
            .and_modify(|incumbent| {
                if challenger_wins(incumbent, record) {
                    debug!(
                        "Duplicate industry rows for '{}' ({}): keeping score {:?} over {:?}",
                        record.brand, record.year, record.score, incumbent.score
                    );
                    *incumbent = record;
                }
            })
            .or_insert(record);
    }

    let mut sums: HashMap<Year, HashMap<NormalizedKey, (f64, usize)>> = HashMap::new();
    for ((_, year, industry), record) in representatives {
        let (sum, count) = sums
            .entry(year)
            .or_default()
            .entry(industry)
            .or_insert((0.0, 0));
        *sum += record.score.unwrap_or_default();
        *count += 1;
    }

    let averages: IndustryAverages = sums
        .into_iter()
        .map(|(year, industries)| {
            let averaged = industries
                .into_iter()
                .map(|(industry, (sum, count))| (industry, sum / count as f64))
                .collect();
            (year, averaged)
        })
        .collect();

    let industry_count: usize = averages.values().map(HashMap::len).sum();
    info!(
        "Computed {} industry-year averages across {} years",
        industry_count,
        averages.len()
    );

    averages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(brand: &str, country: &str, industry: &str, year: Year, score: f64) -> ScoreRecord {
        ScoreRecord {
            brand: brand.to_string(),
            country: country.to_string(),
            industry: industry.to_string(),
            year,
            score: Some(score),
            is_projected: false,
        }
    }

    #[test]
    fn test_averages_per_industry_and_year() {
        let records = vec![
            record("A", "SE", "Retail", 2021, 10.0),
            record("B", "SE", "Retail", 2021, 30.0),
            record("C", "SE", "Energy", 2021, 50.0),
            record("A", "SE", "Retail", 2020, 40.0),
        ];
        let averages = compute_industry_averages(&records);

        assert_eq!(averages[&2021]["retail"], 20.0);
        assert_eq!(averages[&2021]["energy"], 50.0);
        assert_eq!(averages[&2020]["retail"], 40.0);
    }

    #[test]
    fn test_duplicate_brand_rows_do_not_skew_the_mean() {
        // The same brand fed twice in one year counts once, at its highest
        // score, exactly like the resolver's representative pick.
        let records = vec![
            record("A", "SE", "Retail", 2021, 10.0),
            record("A", "NO", "Retail", 2021, 16.0),
            record("B", "SE", "Retail", 2021, 30.0),
        ];
        let averages = compute_industry_averages(&records);
        assert_eq!(averages[&2021]["retail"], 23.0);
    }

    #[test]
    fn test_independent_of_any_selection() {
        let full = vec![
            record("A", "SE", "Retail", 2021, 10.0),
            record("B", "SE", "Retail", 2021, 30.0),
            record("C", "NO", "Retail", 2021, 50.0),
        ];
        let baseline = compute_industry_averages(&full)[&2021]["retail"];

        // The only way to change the benchmark is to change the dataset;
        // there is no selection parameter to pass.
        assert_eq!(baseline, 30.0);
    }

    #[test]
    fn test_unscored_and_unlabeled_rows_excluded() {
        let mut unscored = record("A", "SE", "Retail", 2021, 0.0);
        unscored.score = None;
        let records = vec![
            unscored,
            record("B", "SE", "", 2021, 30.0),
            record("C", "SE", "Retail", 2021, 20.0),
        ];
        let averages = compute_industry_averages(&records);
        assert_eq!(averages[&2021]["retail"], 20.0);
        assert_eq!(averages[&2021].len(), 1);
    }

    #[test]
    fn test_industry_spellings_normalize_together() {
        let records = vec![
            record("A", "SE", "Fast Food", 2021, 10.0),
            record("B", "SE", "fastfood", 2021, 30.0),
        ];
        let averages = compute_industry_averages(&records);
        assert_eq!(averages[&2021]["fastfood"], 20.0);
    }

    #[test]
    fn test_empty_dataset() {
        assert!(compute_industry_averages(&[]).is_empty());
    }
}

use std::collections::HashMap;

use log::info;
use ndarray::Array1;

use super::types::{CohortStats, CohortStatsMap, CountryCode, Year};
use crate::config::settings::StatsSettings;
use crate::domain::ScoreRecord;

/// Compute per-(country, year) cohort statistics over the entire unfiltered
/// market.
///
/// The comparison basis is deliberately the whole market in each
/// country-year, never the user's current brand selection. Records without
/// a score (or with the feed's zero placeholder) do not contribute. Cohorts
/// with fewer than 2 samples stay in the map but fail
/// [`CohortStats::is_valid`], so callers can tell a thin cohort apart from
/// a missing one.
pub fn compute_cohort_stats(records: &[ScoreRecord], config: &StatsSettings) -> CohortStatsMap {
    let mut samples: HashMap<(CountryCode, Year), Vec<f64>> = HashMap::new();
    for record in records {
        if record.has_score() {
            samples
                .entry((record.country.clone(), record.year))
                .or_default()
                .push(record.score.unwrap_or_default());
        }
    }

    let mut stats: CohortStatsMap = HashMap::new();
    let mut thin_cohorts = 0usize;
    for ((country, year), values) in samples {
        let cohort = summarize(values, config);
        if !cohort.is_valid() {
            thin_cohorts += 1;
        }
        stats.entry(country).or_default().insert(year, cohort);
    }

    let cohort_count: usize = stats.values().map(HashMap::len).sum();
    info!(
        "Computed {} cohorts across {} countries ({} below the validity gate)",
        cohort_count,
        stats.len(),
        thin_cohorts
    );

    stats
}

fn summarize(values: Vec<f64>, config: &StatsSettings) -> CohortStats {
    let count = values.len();
    let samples = Array1::from(values);
    let mean = samples.mean().unwrap_or(0.0);

    // Population standard deviation (ddof = 0): the cohort IS the market,
    // not a sample drawn from it.
    let mut std_dev = samples.std(0.0);
    if std_dev < config.std_epsilon {
        std_dev = config.std_floor;
    }

    CohortStats { mean, std_dev, count }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, year: Year, brand: &str, score: Option<f64>) -> ScoreRecord {
        ScoreRecord {
            brand: brand.to_string(),
            country: country.to_string(),
            industry: "Retail".to_string(),
            year,
            score,
            is_projected: false,
        }
    }

    fn stats_for<'a>(map: &'a CohortStatsMap, country: &str, year: Year) -> &'a CohortStats {
        map.get(country).and_then(|y| y.get(&year)).unwrap()
    }

    #[test]
    fn test_mean_and_population_std_dev() {
        let records = vec![
            record("SE", 2021, "A", Some(10.0)),
            record("SE", 2021, "B", Some(20.0)),
            record("SE", 2021, "C", Some(30.0)),
        ];
        let map = compute_cohort_stats(&records, &StatsSettings::default());
        let cohort = stats_for(&map, "SE", 2021);

        assert_eq!(cohort.count, 3);
        assert!((cohort.mean - 20.0).abs() < 1e-9);
        assert!((cohort.std_dev - 8.164_965).abs() < 1e-3);
        assert!(cohort.is_valid());
    }

    #[test]
    fn test_single_sample_cohort_fails_validity_gate() {
        let records = vec![
            record("NO", 2020, "A", Some(55.0)),
            record("NO", 2020, "B", None),
            record("NO", 2020, "C", Some(0.0)),
        ];
        let map = compute_cohort_stats(&records, &StatsSettings::default());
        let cohort = stats_for(&map, "NO", 2020);

        assert_eq!(cohort.count, 1);
        assert!(!cohort.is_valid());
    }

    #[test]
    fn test_null_and_zero_scores_excluded() {
        let records = vec![
            record("SE", 2021, "A", Some(40.0)),
            record("SE", 2021, "B", Some(0.0)),
            record("SE", 2021, "C", None),
            record("SE", 2021, "D", Some(60.0)),
        ];
        let map = compute_cohort_stats(&records, &StatsSettings::default());
        let cohort = stats_for(&map, "SE", 2021);

        assert_eq!(cohort.count, 2);
        assert!((cohort.mean - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_std_dev_clamped() {
        let records = vec![
            record("FI", 2022, "A", Some(42.0)),
            record("FI", 2022, "B", Some(42.0)),
        ];
        let map = compute_cohort_stats(&records, &StatsSettings::default());
        let cohort = stats_for(&map, "FI", 2022);

        assert_eq!(cohort.std_dev, 1.0);
        assert!(cohort.is_valid());
    }

    #[test]
    fn test_groups_by_country_and_year() {
        let records = vec![
            record("SE", 2020, "A", Some(10.0)),
            record("SE", 2021, "A", Some(20.0)),
            record("NO", 2020, "A", Some(30.0)),
        ];
        let map = compute_cohort_stats(&records, &StatsSettings::default());

        assert_eq!(map.len(), 2);
        assert_eq!(map["SE"].len(), 2);
        assert_eq!(map["NO"].len(), 1);
    }

    #[test]
    fn test_empty_dataset_yields_empty_map() {
        let map = compute_cohort_stats(&[], &StatsSettings::default());
        assert!(map.is_empty());
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::resolver::{challenger_wins, CrossMarketMatch};
use super::standardize::{score_for_mode, ScoreMode};
use super::types::{CohortStatsMap, CountryCode, NormalizedKey, Year};
use crate::domain::ScoreRecord;

/// One point on a (brand, country) series. `value: None` is an explicit
/// gap: the year had no usable record, or standardization had no valid
/// cohort. Gaps are never interpolated and never rendered as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: Year,
    pub value: Option<f64>,
    pub projected: bool,
}

/// A chart-ready numeric series for one resolved brand in one country,
/// indexed over the shared year axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandSeries {
    pub key: NormalizedKey,
    pub brand: String,
    pub country: CountryCode,
    pub via_fallback: bool,
    pub points: Vec<SeriesPoint>,
}

/// Assemble per-(brand, country) series for the resolved matches.
///
/// The year axis is the sorted union of years scored in the selected
/// countries, so every series lines up under the same x-axis. Duplicate
/// records for one (brand, country, year) collapse to the highest score.
/// Under [`ScoreMode::Standardized`] each point is expressed against that
/// country-year's cohort; an invalid cohort propagates as a gap.
pub fn assemble(
    matches: &[CrossMarketMatch],
    countries: &[CountryCode],
    records: &[ScoreRecord],
    cohort_stats: &CohortStatsMap,
    mode: ScoreMode,
) -> Vec<BrandSeries> {
    let years = year_axis(countries, records);

    // Winning record per (brand, country, year).
    let mut by_year: HashMap<(NormalizedKey, &str, Year), &ScoreRecord> = HashMap::new();
    for record in records {
        if !countries.iter().any(|c| c == &record.country) {
            continue;
        }
        by_year
            .entry((record.brand_key(), record.country.as_str(), record.year))
            .and_modify(|incumbent| {
                if challenger_wins(incumbent, record) {
                    *incumbent = record;
                }
            })
            .or_insert(record);
    }

    let mut series = Vec::with_capacity(matches.len() * countries.len());
    for brand_match in matches {
        for country in countries {
            let points = years
                .iter()
                .map(|&year| {
                    build_point(
                        brand_match,
                        country,
                        year,
                        by_year.get(&(brand_match.key.clone(), country.as_str(), year)),
                        cohort_stats,
                        mode,
                    )
                })
                .collect();

            series.push(BrandSeries {
                key: brand_match.key.clone(),
                brand: brand_match.display_name.clone(),
                country: country.clone(),
                via_fallback: brand_match.via_fallback,
                points,
            });
        }
    }

    series
}

fn build_point(
    brand_match: &CrossMarketMatch,
    country: &str,
    year: Year,
    record: Option<&&ScoreRecord>,
    cohort_stats: &CohortStatsMap,
    mode: ScoreMode,
) -> SeriesPoint {
    // A brand can be a valid cross-market match while still absent from
    // this particular country (AtLeastTwo mode): all gaps in that case.
    if brand_match.record_for(country).is_none() {
        return SeriesPoint { year, value: None, projected: false };
    }

    let Some(record) = record else {
        return SeriesPoint { year, value: None, projected: false };
    };

    let value = record.score.and_then(|raw| {
        let cohort = cohort_stats.get(country).and_then(|by_year| by_year.get(&year));
        score_for_mode(raw, cohort, mode)
    });

    SeriesPoint { year, value, projected: record.is_projected }
}

/// Sorted union of years with records in the selected countries.
fn year_axis(countries: &[CountryCode], records: &[ScoreRecord]) -> Vec<Year> {
    let mut years: Vec<Year> = records
        .iter()
        .filter(|r| countries.iter().any(|c| c == &r.country))
        .map(|r| r.year)
        .collect();
    years.sort_unstable();
    years.dedup();
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{ResolverSettings, StatsSettings};
    use crate::engine::cohort::compute_cohort_stats;
    use crate::engine::resolver::{resolve, MatchMode};

    fn record(country: &str, brand: &str, year: Year, score: Option<f64>) -> ScoreRecord {
        ScoreRecord {
            brand: brand.to_string(),
            country: country.to_string(),
            industry: "Retail".to_string(),
            year,
            score,
            is_projected: false,
        }
    }

    fn countries(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn resolve_all(selection: &[String], records: &[ScoreRecord]) -> Vec<CrossMarketMatch> {
        resolve(
            selection,
            records,
            MatchMode::AllCountries,
            &ResolverSettings { fallback_threshold: 0 },
            &[],
        )
    }

    fn series_for<'a>(
        series: &'a [BrandSeries],
        key: &str,
        country: &str,
    ) -> &'a BrandSeries {
        series
            .iter()
            .find(|s| s.key == key && s.country == country)
            .unwrap()
    }

    #[test]
    fn test_missing_year_is_an_explicit_gap() {
        let selection = countries(&["SE", "NO"]);
        let records = vec![
            record("SE", "Alpha", 2020, Some(10.0)),
            record("SE", "Alpha", 2022, Some(12.0)),
            record("SE", "Beta", 2021, Some(11.0)),
            record("NO", "Alpha", 2020, Some(20.0)),
            record("NO", "Beta", 2021, Some(21.0)),
        ];
        let matches = resolve_all(&selection, &records);
        let stats = compute_cohort_stats(&records, &StatsSettings::default());
        let series = assemble(&matches, &selection, &records, &stats, ScoreMode::Raw);

        let alpha_se = series_for(&series, "alpha", "SE");
        let years: Vec<Year> = alpha_se.points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2020, 2021, 2022]);

        // 2021 has no Alpha record in SE: a gap, never zero.
        assert_eq!(alpha_se.points[0].value, Some(10.0));
        assert_eq!(alpha_se.points[1].value, None);
        assert_eq!(alpha_se.points[2].value, Some(12.0));
    }

    #[test]
    fn test_standardization_failure_propagates_as_gap() {
        let selection = countries(&["SE"]);
        // 2020 has a two-brand cohort, 2021 only one valid score.
        let records = vec![
            record("SE", "Alpha", 2020, Some(10.0)),
            record("SE", "Beta", 2020, Some(30.0)),
            record("SE", "Alpha", 2021, Some(15.0)),
        ];
        let matches = resolve_all(&selection, &records);
        let stats = compute_cohort_stats(&records, &StatsSettings::default());
        let series = assemble(&matches, &selection, &records, &stats, ScoreMode::Standardized);

        let alpha = series_for(&series, "alpha", "SE");
        // 2020: mean 20, population std dev 10, so Alpha sits at -1.
        assert!((alpha.points[0].value.unwrap() + 1.0).abs() < 1e-9);
        assert_eq!(alpha.points[1].value, None);
    }

    #[test]
    fn test_raw_mode_bypasses_cohorts() {
        let selection = countries(&["SE"]);
        let records = vec![record("SE", "Alpha", 2021, Some(15.0))];
        let matches = resolve_all(&selection, &records);
        let stats = compute_cohort_stats(&records, &StatsSettings::default());
        let series = assemble(&matches, &selection, &records, &stats, ScoreMode::Raw);

        assert_eq!(series_for(&series, "alpha", "SE").points[0].value, Some(15.0));
    }

    #[test]
    fn test_duplicate_year_records_collapse_to_highest() {
        let selection = countries(&["SE"]);
        let records = vec![
            record("SE", "Alpha", 2021, Some(40.0)),
            record("SE", "Alpha", 2021, Some(55.0)),
            record("SE", "Beta", 2021, Some(10.0)),
        ];
        let matches = resolve_all(&selection, &records);
        let stats = compute_cohort_stats(&records, &StatsSettings::default());
        let series = assemble(&matches, &selection, &records, &stats, ScoreMode::Raw);

        assert_eq!(series_for(&series, "alpha", "SE").points[0].value, Some(55.0));
    }

    #[test]
    fn test_absent_market_yields_all_gaps() {
        let selection = countries(&["SE", "NO", "FI"]);
        let records = vec![
            record("SE", "Alpha", 2021, Some(1.0)),
            record("NO", "Alpha", 2021, Some(2.0)),
            record("FI", "Beta", 2021, Some(3.0)),
            record("SE", "Beta", 2021, Some(4.0)),
        ];
        let matches = resolve(
            &selection,
            &records,
            MatchMode::AtLeastTwo,
            &ResolverSettings { fallback_threshold: 0 },
            &[],
        );
        let stats = compute_cohort_stats(&records, &StatsSettings::default());
        let series = assemble(&matches, &selection, &records, &stats, ScoreMode::Raw);

        let alpha_fi = series_for(&series, "alpha", "FI");
        assert!(alpha_fi.points.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn test_projected_flag_carried_through() {
        let selection = countries(&["SE"]);
        let mut projected = record("SE", "Alpha", 2022, Some(12.0));
        projected.is_projected = true;
        let records = vec![record("SE", "Alpha", 2021, Some(10.0)), projected];

        let matches = resolve_all(&selection, &records);
        let stats = compute_cohort_stats(&records, &StatsSettings::default());
        let series = assemble(&matches, &selection, &records, &stats, ScoreMode::Raw);

        let alpha = series_for(&series, "alpha", "SE");
        assert!(!alpha.points[0].projected);
        assert!(alpha.points[1].projected);
    }

    #[test]
    fn test_empty_inputs_produce_empty_series() {
        let stats = CohortStatsMap::new();
        assert!(assemble(&[], &countries(&["SE"]), &[], &stats, ScoreMode::Raw).is_empty());
    }
}

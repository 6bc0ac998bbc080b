use std::collections::{HashMap, HashSet};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::normalizer::normalize_name;
use super::preferred::select_preferred;
use super::types::{CountryCode, NormalizedKey};
use crate::config::settings::ResolverSettings;
use crate::domain::ScoreRecord;

/// How brand presence across the selected countries is intersected. Both
/// modes ship in the product: the comparison panel wants brands scored in
/// every selected market, the broader explorer view accepts any overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Brand must be present in every selected country.
    AllCountries,
    /// Brand must be present in at least 2 of the selected countries.
    AtLeastTwo,
}

/// A brand resolved as comparable across the selected markets, with the
/// winning record per country. A country missing from `records` means the
/// brand is absent there (possible under [`MatchMode::AtLeastTwo`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossMarketMatch {
    pub key: NormalizedKey,
    pub display_name: String,
    pub records: HashMap<CountryCode, ScoreRecord>,
    /// Added from the curated fallback list rather than found naturally.
    pub via_fallback: bool,
}

impl CrossMarketMatch {
    pub fn record_for(&self, country: &str) -> Option<&ScoreRecord> {
        self.records.get(country)
    }

    pub fn market_count(&self) -> usize {
        self.records.len()
    }
}

/// Whether `challenger` replaces `incumbent` as the representative record.
/// Highest score wins; a missing score never beats a present one; equal
/// scores keep the incumbent, so input order settles exact ties.
pub(crate) fn challenger_wins(incumbent: &ScoreRecord, challenger: &ScoreRecord) -> bool {
    score_rank(challenger) > score_rank(incumbent)
}

fn score_rank(record: &ScoreRecord) -> f64 {
    record.score.unwrap_or(f64::NEG_INFINITY)
}

/// Resolve the brands that can be meaningfully compared across the selected
/// countries.
///
/// Normalized brand keys are intersected per `mode`; a single selected
/// country returns everything it scores with no intersection. When natural
/// matches come up short of the configured threshold and at least two
/// countries are selected, the curated fallback list pads the result, but
/// only with brands verified by direct lookup to be scored in every selected
/// country. Zero selected countries resolve to an empty result with no
/// fallback.
pub fn resolve(
    countries: &[CountryCode],
    records: &[ScoreRecord],
    mode: MatchMode,
    config: &ResolverSettings,
    fallback_brands: &[&str],
) -> Vec<CrossMarketMatch> {
    if countries.is_empty() {
        return Vec::new();
    }

    let selected: HashSet<&str> = countries.iter().map(String::as_str).collect();

    // Presence sets, observed spelling variants, and the winning record per
    // (brand, country), in one pass over the feed.
    let mut presence: HashMap<NormalizedKey, HashSet<CountryCode>> = HashMap::new();
    let mut variants: HashMap<NormalizedKey, Vec<String>> = HashMap::new();
    let mut best: HashMap<(NormalizedKey, CountryCode), ScoreRecord> = HashMap::new();

    for record in records {
        if !selected.contains(record.country.as_str()) {
            continue;
        }
        let key = record.brand_key();
        if key.is_empty() {
            continue;
        }

        presence.entry(key.clone()).or_default().insert(record.country.clone());

        let seen = variants.entry(key.clone()).or_default();
        if !seen.iter().any(|v| v == &record.brand) {
            seen.push(record.brand.clone());
        }

        match best.entry((key, record.country.clone())) {
            std::collections::hash_map::Entry::Occupied(mut entry) => {
                if challenger_wins(entry.get(), record) {
                    debug!(
                        "Duplicate records for '{}' in {}: keeping score {:?} over {:?}",
                        record.brand,
                        record.country,
                        record.score,
                        entry.get().score
                    );
                    entry.insert(record.clone());
                }
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(record.clone());
            }
        }
    }

    let mut natural: Vec<NormalizedKey> = presence
        .iter()
        .filter(|(_, markets)| match mode {
            _ if countries.len() == 1 => true,
            MatchMode::AllCountries => markets.len() == countries.len(),
            MatchMode::AtLeastTwo => markets.len() >= 2,
        })
        .map(|(key, _)| key.clone())
        .collect();
    natural.sort();

    let mut matched: HashSet<NormalizedKey> = natural.iter().cloned().collect();
    let mut matches: Vec<CrossMarketMatch> = natural
        .into_iter()
        .map(|key| build_match(key, false, countries, &variants, &best))
        .collect();
    let natural_count = matches.len();

    // Padding only makes sense for an actual cross-market comparison, and
    // only with brands the data can back in every selected country.
    if countries.len() >= 2 && natural_count < config.fallback_threshold {
        for brand in fallback_brands {
            let key = normalize_name(brand);
            if matched.contains(&key) {
                continue;
            }
            let everywhere = presence
                .get(&key)
                .is_some_and(|markets| countries.iter().all(|c| markets.contains(c)));
            if !everywhere {
                debug!("Fallback brand '{brand}' not scored in every selected country, skipping");
                continue;
            }
            matched.insert(key.clone());
            matches.push(build_match(key, true, countries, &variants, &best));
        }
    }

    info!(
        "Resolved {} cross-market brands for [{}] ({} natural, {} via fallback)",
        matches.len(),
        countries.join(", "),
        natural_count,
        matches.len() - natural_count
    );

    matches
}

fn build_match(
    key: NormalizedKey,
    via_fallback: bool,
    countries: &[CountryCode],
    variants: &HashMap<NormalizedKey, Vec<String>>,
    best: &HashMap<(NormalizedKey, CountryCode), ScoreRecord>,
) -> CrossMarketMatch {
    let observed = variants.get(&key).map(Vec::as_slice).unwrap_or(&[]);
    let display_name = select_preferred(observed, &key).unwrap_or_else(|| key.clone());

    let records = countries
        .iter()
        .filter_map(|country| {
            best.get(&(key.clone(), country.clone()))
                .map(|record| (country.clone(), record.clone()))
        })
        .collect();

    CrossMarketMatch { key, display_name, records, via_fallback }
}

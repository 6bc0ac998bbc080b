use std::collections::HashMap;
use std::sync::LazyLock;

use crate::config::brands;

static DISPLAY_OVERRIDES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    brands::display_overrides()
        .into_iter()
        .map(|o| (o.key, o.display))
        .collect()
});

// Suffixes the source data uses for corporate entities. A variant carrying
// one is usually the registered name rather than a typo.
const CORPORATE_SUFFIXES: &[&str] = &[" AB", " ASA", " AS", " A/S", " Oy", " Inc", " Ltd", " GmbH"];

const MAX_TIDY_LENGTH: usize = 20;

/// Pick one display spelling for a normalized key, given every raw variant
/// observed for it across markets and years.
///
/// A canonical-capitalization override ("IKEA", "McDonald's") wins outright;
/// otherwise variants are scored heuristically and ties fall to the
/// first-seen variant, so the result is stable across reruns.
pub fn select_preferred(variants: &[String], key: &str) -> Option<String> {
    if let Some(display) = DISPLAY_OVERRIDES.get(key) {
        return Some((*display).to_string());
    }

    let mut best: Option<(&String, i32)> = None;
    for variant in variants {
        let score = score_variant(variant);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((variant, score)),
        }
    }
    best.map(|(v, _)| v.clone())
}

fn score_variant(variant: &str) -> i32 {
    let mut score = 0;

    if variant.chars().next().is_some_and(|c| c.is_uppercase()) {
        score += 2;
    }
    if !variant.contains("  ") {
        score += 1;
    }
    if variant.contains('\'') {
        score += 1;
    }
    if variant.chars().any(|c| c.is_alphabetic()) && !variant.chars().any(|c| c.is_uppercase()) {
        score -= 1;
    }
    if CORPORATE_SUFFIXES.iter().any(|s| variant.ends_with(s)) {
        score += 1;
    }
    if variant.chars().count() > MAX_TIDY_LENGTH {
        score -= 1;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_capitalized_beats_lowercase() {
        let v = variants(&["arla foods", "Arla Foods"]);
        assert_eq!(select_preferred(&v, "arlafoods").as_deref(), Some("Arla Foods"));
    }

    #[test]
    fn test_apostrophe_and_suffix_rewarded() {
        let v = variants(&["Olearys", "O'Learys"]);
        assert_eq!(select_preferred(&v, "o'learys").as_deref(), Some("O'Learys"));

        let v = variants(&["Volvo Cars", "Volvo Cars AB"]);
        assert_eq!(select_preferred(&v, "volvocars").as_deref(), Some("Volvo Cars AB"));
    }

    #[test]
    fn test_double_spaces_and_overlong_penalized() {
        let v = variants(&["Arla  Foods", "Arla Foods"]);
        assert_eq!(select_preferred(&v, "arlafoods").as_deref(), Some("Arla Foods"));

        let v = variants(&["Telenor Communications Nordic", "Telenor"]);
        assert_eq!(select_preferred(&v, "telenor").as_deref(), Some("Telenor"));
    }

    #[test]
    fn test_tie_falls_to_first_seen() {
        let v = variants(&["Fjällräven", "Fjällraven"]);
        assert_eq!(select_preferred(&v, "fjallraven").as_deref(), Some("Fjällräven"));
    }

    #[test]
    fn test_display_override_wins_over_scoring() {
        // "Ikea AB" would out-score "ikea", but the override pins the label.
        let v = variants(&["ikea", "Ikea AB"]);
        assert_eq!(select_preferred(&v, "ikea").as_deref(), Some("IKEA"));
    }

    #[test]
    fn test_empty_variants_without_override() {
        assert_eq!(select_preferred(&[], "unknownbrand"), None);
    }
}

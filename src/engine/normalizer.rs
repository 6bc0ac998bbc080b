use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::types::NormalizedKey;
use crate::config::brands;

// Keeps letters, digits, spaces, apostrophes, ampersands and hyphens;
// everything else is dropped before whitespace removal.
static STRIP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N} '&\-]").expect("valid strip pattern"));

static NAME_OVERRIDES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    brands::name_overrides()
        .into_iter()
        .map(|o| (o.spelling, o.key))
        .collect()
});

/// Canonicalize a free-text brand or industry label into a comparison key.
///
/// The configured override table is consulted first; the generic rules alone
/// cannot tell that "McDonald's" and "McDonalds" are one brand. Generic
/// rules: lower-case, trim, strip punctuation outside the allowed set, then
/// remove all whitespace so comparison is whitespace-insensitive.
///
/// Total and idempotent: defined for every input, the empty string maps to
/// the empty key, and re-normalizing a key returns it unchanged.
pub fn normalize_name(raw: &str) -> NormalizedKey {
    normalize_with_overrides(raw, &NAME_OVERRIDES)
}

/// Same rules as [`normalize_name`] with an explicit override table.
/// Override targets must themselves be fixed points of the generic rules,
/// otherwise idempotence breaks.
pub fn normalize_with_overrides(
    raw: &str,
    overrides: &HashMap<&str, &str>,
) -> NormalizedKey {
    let lowered = raw.trim().to_lowercase();
    if let Some(key) = overrides.get(lowered.as_str()) {
        return (*key).to_string();
    }

    let stripped = STRIP_PATTERN.replace_all(&lowered, "");
    stripped.split_whitespace().collect()
}

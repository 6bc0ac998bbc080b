/// Markets covered by the brand sustainability survey
///
/// The raw feed is inconsistent about how it names a market: some rows carry
/// the ISO code ("SE"), others the full English name ("Sweden"), in mixed
/// casing. Everything is resolved to the canonical code at ingestion.
#[derive(Debug, Clone)]
pub struct CountryEntry {
    pub code: &'static str,
    pub name: &'static str,
}

impl CountryEntry {
    pub fn new(code: &'static str, name: &'static str) -> Self {
        Self { code, name }
    }
}

/// Get the list of markets the survey is run in.
pub fn get_countries() -> Vec<CountryEntry> {
    vec![
        CountryEntry::new("SE", "Sweden"),
        CountryEntry::new("NO", "Norway"),
        CountryEntry::new("DK", "Denmark"),
        CountryEntry::new("FI", "Finland"),
        CountryEntry::new("NL", "Netherlands"),
        CountryEntry::new("DE", "Germany"),
        CountryEntry::new("EE", "Estonia"),
        CountryEntry::new("LV", "Latvia"),
        CountryEntry::new("LT", "Lithuania"),
    ]
}

/// Resolve a code or full country name (case-insensitive) to the canonical
/// upper-case code. Unknown labels resolve to `None`.
pub fn canonical_code(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    get_countries()
        .into_iter()
        .find(|c| c.code.eq_ignore_ascii_case(trimmed) || c.name.eq_ignore_ascii_case(trimmed))
        .map(|c| c.code)
}

/// Full display name for a canonical code.
pub fn country_name(code: &str) -> Option<&'static str> {
    get_countries()
        .into_iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
        .map(|c| c.name)
}

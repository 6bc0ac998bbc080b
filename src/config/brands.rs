/// Brand name configuration for cross-market reconciliation
///
/// Source data spells the same brand differently across markets and survey
/// years ("McDonald's" vs "McDonalds", "H&M" vs "H & M"). The generic
/// normalization rules cannot resolve punctuation-ambiguous names, so the
/// ambiguous spellings are pinned here. Keys are matched against the
/// lower-cased, trimmed input before the generic rules run.
#[derive(Debug, Clone)]
pub struct NameOverride {
    pub spelling: &'static str,
    pub key: &'static str,
}

impl NameOverride {
    pub fn new(spelling: &'static str, key: &'static str) -> Self {
        Self { spelling, key }
    }
}

/// Special-case spellings that the generic normalization rules map to
/// different keys even though they name the same brand.
pub fn name_overrides() -> Vec<NameOverride> {
    vec![
        NameOverride::new("mcdonald's", "mcdonalds"),
        NameOverride::new("mc donald's", "mcdonalds"),
        NameOverride::new("mcdonalds", "mcdonalds"),
        NameOverride::new("h&m", "hm"),
        NameOverride::new("h & m", "hm"),
        NameOverride::new("h&m hennes & mauritz", "hm"),
        NameOverride::new("coca-cola", "cocacola"),
        NameOverride::new("coca cola", "cocacola"),
        NameOverride::new("kellogg's", "kelloggs"),
        NameOverride::new("kelloggs", "kelloggs"),
        NameOverride::new("ben & jerry's", "benjerrys"),
        NameOverride::new("ben and jerry's", "benjerrys"),
        NameOverride::new("marks & spencer", "marksspencer"),
        NameOverride::new("m&s", "marksspencer"),
        NameOverride::new("7-eleven", "7eleven"),
        NameOverride::new("7 eleven", "7eleven"),
    ]
}

/// Canonical display capitalizations, keyed by normalized key. These win
/// over the variant-scoring heuristic when the dashboard needs one label.
#[derive(Debug, Clone)]
pub struct DisplayOverride {
    pub key: &'static str,
    pub display: &'static str,
}

impl DisplayOverride {
    pub fn new(key: &'static str, display: &'static str) -> Self {
        Self { key, display }
    }
}

pub fn display_overrides() -> Vec<DisplayOverride> {
    vec![
        DisplayOverride::new("ikea", "IKEA"),
        DisplayOverride::new("mcdonalds", "McDonald's"),
        DisplayOverride::new("hm", "H&M"),
        DisplayOverride::new("lego", "LEGO"),
        DisplayOverride::new("cocacola", "Coca-Cola"),
        DisplayOverride::new("kelloggs", "Kellogg's"),
        DisplayOverride::new("benjerrys", "Ben & Jerry's"),
        DisplayOverride::new("marksspencer", "Marks & Spencer"),
        DisplayOverride::new("7eleven", "7-Eleven"),
    ]
}

/// Curated list of globally recognizable brands used to pad a sparse
/// cross-market comparison. A brand from this list is only added after a
/// direct lookup confirms it is scored in every selected country.
pub fn fallback_brands() -> Vec<&'static str> {
    vec![
        "IKEA",
        "Coca-Cola",
        "McDonald's",
        "H&M",
        "LEGO",
        "Nike",
        "Adidas",
        "Toyota",
        "Samsung",
        "Apple",
        "Nestlé",
        "Lidl",
        "Volvo",
        "Zara",
    ]
}

#[derive(Debug, Clone)]
pub struct StatsSettings {
    /// Standard deviations below this are treated as degenerate.
    pub std_epsilon: f64,
    /// Degenerate deviations are clamped to this value so that derived
    /// z-scores stay finite.
    pub std_floor: f64,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            std_epsilon: 0.001,
            std_floor: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// When fewer natural cross-market matches than this are found, the
    /// resolver pads the result from the curated fallback brand list.
    pub fallback_threshold: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            fallback_threshold: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub cache_dir: &'static str,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { cache_dir: "cache" }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub stats: StatsSettings,
    pub resolver: ResolverSettings,
    pub cache: CacheSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

// Settings are passed explicitly (dependency injection) rather than read
// from globals, so call sites stay testable with non-default thresholds.

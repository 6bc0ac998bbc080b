pub mod cohort;
pub mod industry;
pub mod normalizer;
pub mod preferred;
pub mod resolver;
pub mod series;
pub mod standardize;
pub mod types;

pub use cohort::compute_cohort_stats;
pub use industry::compute_industry_averages;
pub use normalizer::normalize_name;
pub use preferred::select_preferred;
pub use resolver::{resolve, CrossMarketMatch, MatchMode};
pub use series::{assemble, BrandSeries, SeriesPoint};
pub use standardize::{score_for_mode, standardize, ScoreMode};
pub use types::{CohortStats, CohortStatsMap, IndustryAverages};

pub mod models;

pub use models::{ComparisonResponse, MarketScorePayload, MatchPayload, SeriesPayload};

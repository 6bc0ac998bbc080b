pub mod models;

pub use models::{DatasetMeta, NumberOrText, RecordResponse, ScoreRecord};

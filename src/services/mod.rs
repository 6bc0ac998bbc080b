pub mod comparison;
pub mod ingestion;
pub mod processing;

pub use comparison::{ComparisonRequest, ComparisonService};
pub use ingestion::IngestionService;
pub use processing::ProcessingService;

pub mod brands;
pub mod countries;
pub mod settings;

pub use brands::{display_overrides, fallback_brands, name_overrides};
pub use countries::{canonical_code, country_name, get_countries};
pub use settings::AppConfig;

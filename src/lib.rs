pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod output;
pub mod services;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::engine::resolver::MatchMode;
use crate::engine::standardize::ScoreMode;
use crate::services::comparison::{ComparisonRequest, ComparisonService};
use crate::services::ingestion::IngestionService;
use crate::services::processing::ProcessingService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_ingest(input: &Path) -> Result<()> {
    let config = AppConfig::new();
    let service = IngestionService::new(&config)?;
    service.run(input)
}

pub fn handle_process() -> Result<()> {
    let config = AppConfig::new();
    let service = ProcessingService::new(config)?;
    service.run()
}

pub fn handle_compare(
    countries: &[String],
    brands: Option<&[String]>,
    partial: bool,
    standardized: bool,
) -> Result<()> {
    let config = AppConfig::new();
    let request = ComparisonRequest {
        countries: countries.to_vec(),
        brands: brands.map(<[String]>::to_vec),
        match_mode: if partial {
            MatchMode::AtLeastTwo
        } else {
            MatchMode::AllCountries
        },
        score_mode: if standardized {
            ScoreMode::Standardized
        } else {
            ScoreMode::Raw
        },
    };
    let service = ComparisonService::new(config)?;
    service.run(&request)
}

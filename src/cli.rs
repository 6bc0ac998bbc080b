use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "brand-sustainability-ranking backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Load a raw score feed and store it as validated records in the cache
    Ingest {
        /// Path to the JSON feed file
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Compute cohort statistics and industry averages from cached records
    Process,
    /// Resolve comparable brands across markets and assemble chart series
    Compare {
        /// Country codes or names, comma separated (e.g. SE,NO,FI)
        #[arg(short, long, value_delimiter = ',')]
        countries: Vec<String>,
        /// Restrict the comparison to these brands, comma separated
        #[arg(short, long, value_delimiter = ',')]
        brands: Option<Vec<String>>,
        /// Accept brands present in at least 2 of the selected countries
        /// instead of requiring presence in all of them
        #[arg(long)]
        partial: bool,
        /// Express scores in cohort standard-deviation units
        #[arg(long)]
        standardized: bool,
    },
}

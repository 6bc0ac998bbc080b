use anyhow::Result;

use brand_sustainability_ranking::cli::Command;
use brand_sustainability_ranking::{handle_compare, handle_ingest, handle_process, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Ingest { input } => handle_ingest(input),
        Command::Process => handle_process(),
        Command::Compare {
            countries,
            brands,
            partial,
            standardized,
        } => handle_compare(countries, brands.as_deref(), *partial, *standardized),
    }
}

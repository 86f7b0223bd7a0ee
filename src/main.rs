//! station-index CLI entry point

use clap::Parser;
use station_index::cli::{Cli, Commands};
use station_index::core::error::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("STATION_INDEX_LOG"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rebuild(args) => station_index::cli::rebuild::run(args),
        Commands::Sources(args) => station_index::cli::rebuild::run_sources(args),
        Commands::Point(args) => station_index::cli::lookup::run(args),
        Commands::Resolve(args) => station_index::cli::lookup::run_resolve(args),
    }
}

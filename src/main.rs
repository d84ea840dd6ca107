//! CLI entry point for socket-matched tile generation

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wavetile::io::cli::{Cli, Runner};

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Runner::new(cli).run().map(|_| ())
}

//! Bulwark CLI entry point.

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bulwark::cli::Cli;

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for rendered documents.
    // RUST_LOG wins over the default level, --debug wins over both.
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if cli.debug => filter.add_directive("bulwark=debug".parse()?),
        Ok(filter) => filter,
        Err(_) if cli.debug => EnvFilter::new("bulwark=debug"),
        Err(_) => EnvFilter::new("bulwark=info"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    cli.execute()
}

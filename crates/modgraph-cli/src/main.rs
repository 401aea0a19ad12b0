//! modgraph CLI binary.
//!
//! Loads configuration, initializes logging via `tracing`, parses arguments
//! with `clap`, and dispatches to the appropriate command handler.

mod cli;
mod commands;

use miette::Result;
use modgraph_core::config::ModgraphConfig;
use modgraph_util::errors::ModgraphError;

fn main() -> Result<()> {
    let args = cli::parse();
    let cwd = std::env::current_dir().map_err(ModgraphError::Io)?;
    let config = ModgraphConfig::load(&cwd)?;

    let default_level = if args.verbose {
        "debug".to_string()
    } else {
        config.log.level.clone()
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    commands::dispatch(args, &config)
}

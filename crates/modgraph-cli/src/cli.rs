//! CLI argument definitions for modgraph.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "modgraph",
    version,
    about = "Assemble and inspect a recorded dependency resolution",
    long_about = "modgraph reads the per-module dependency edges a resolver recorded, \
                  assembles them into a single module graph rooted at the project, \
                  and reports on it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Resolution record to load (TOML, or JSON with a .json extension)
    #[arg(short, long, global = true, default_value = "modgraph-record.toml")]
    pub record: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display the dependency tree
    Tree {
        /// Maximum tree depth to display
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Explain why a module is in the graph
    Why {
        /// Module as group:name:version, group:name, or name
        module: String,
    },

    /// List dependency cycles
    Cycles,

    /// Assemble the graph and report unresolved dependencies
    Check,
}

pub fn parse() -> Cli {
    Cli::parse()
}

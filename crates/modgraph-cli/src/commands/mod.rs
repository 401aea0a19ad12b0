//! Command dispatch and handler modules.

mod check;
mod cycles;
mod tree;
mod why;

use std::path::Path;

use miette::Result;
use modgraph_core::config::ModgraphConfig;
use modgraph_core::record::ResolutionRecord;
use modgraph_resolver::{EdgeCollector, ResolutionResult};

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli, config: &ModgraphConfig) -> Result<()> {
    match cli.command {
        Command::Tree { depth } => tree::exec(&cli.record, depth, config),
        Command::Why { module } => why::exec(&cli.record, &module),
        Command::Cycles => cycles::exec(&cli.record),
        Command::Check => check::exec(&cli.record),
    }
}

/// Replay a recorded resolution into a collector and assemble it.
fn assemble(record_path: &Path) -> Result<ResolutionResult> {
    let record = ResolutionRecord::from_path(record_path)?;
    let mut collector = EdgeCollector::new();
    collector.start(record.root_id()?);
    for report in record.reports()? {
        collector.record(report.id, report.dependencies);
    }
    tracing::debug!(
        "replayed {} module reports for {} modules",
        record.modules.len(),
        collector.len()
    );
    Ok(collector.result()?)
}

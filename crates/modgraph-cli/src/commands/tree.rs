//! Handler for `modgraph tree`.

use std::path::Path;

use miette::Result;
use modgraph_core::config::ModgraphConfig;

pub fn exec(record: &Path, depth: Option<usize>, config: &ModgraphConfig) -> Result<()> {
    let result = super::assemble(record)?;
    let max_depth = depth.or(config.tree.max_depth);
    print!("{}", result.print_tree(max_depth, config.tree.show_unresolved));
    Ok(())
}

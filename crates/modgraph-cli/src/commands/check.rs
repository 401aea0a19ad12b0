//! Handler for `modgraph check`.

use std::path::Path;

use miette::Result;
use modgraph_util::progress::{self, StatusKind};

pub fn exec(record: &Path) -> Result<()> {
    let result = super::assemble(record)?;
    let unresolved: Vec<_> = result.unresolved_dependencies().collect();

    for (module, dep) in &unresolved {
        progress::print_status(
            StatusKind::Warning,
            "Unresolved",
            &format!("{dep} (required by {module})"),
        );
    }
    progress::print_status(
        StatusKind::Done,
        "Assembled",
        &format!(
            "{} modules, {} dependencies ({} unresolved)",
            result.len(),
            result.dependency_count(),
            unresolved.len()
        ),
    );
    Ok(())
}

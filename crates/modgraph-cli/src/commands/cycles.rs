//! Handler for `modgraph cycles`.

use std::path::Path;

use miette::Result;

pub fn exec(record: &Path) -> Result<()> {
    let result = super::assemble(record)?;
    let cycles = result.cycles();
    if cycles.is_empty() {
        println!("No dependency cycles.");
        return Ok(());
    }

    println!("Dependency cycles ({}):", cycles.len());
    for group in &cycles {
        let members: Vec<String> = group.iter().map(|m| m.id().to_string()).collect();
        println!("  {}", members.join(" <-> "));
    }
    Ok(())
}

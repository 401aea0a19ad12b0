//! Handler for `modgraph why`.

use std::path::Path;

use miette::Result;

pub fn exec(record: &Path, module: &str) -> Result<()> {
    let result = super::assemble(record)?;

    let Some(path) = result.find_path(module) else {
        println!("Module '{module}' not found in the graph.");
        return Ok(());
    };

    println!("Path to {module}:");
    for (i, node) in path.iter().enumerate() {
        let indent = "  ".repeat(i);
        println!("{indent}{node}");
    }
    println!();
    println!("Dependees:");
    print!("{}", result.print_inverted_tree(module));
    Ok(())
}

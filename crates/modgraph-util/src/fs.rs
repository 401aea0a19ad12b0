use std::path::{Path, PathBuf};

use crate::errors::ModgraphError;

/// Path of the nearest `filename` in `start` or one of its ancestors.
pub fn find_file_upwards(start: &Path, filename: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.is_file())
}

/// Read a UTF-8 file, attaching the path to the error message.
pub fn read_to_string(path: &Path) -> Result<String, ModgraphError> {
    std::fs::read_to_string(path).map_err(|e| {
        ModgraphError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        ))
    })
}

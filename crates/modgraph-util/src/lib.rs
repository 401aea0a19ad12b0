//! Shared utilities for modgraph.
//!
//! Cross-cutting concerns used by the other modgraph crates: the unified
//! error type, filesystem helpers, and terminal status lines.

pub mod errors;
pub mod fs;
pub mod progress;

//! Core data types for modgraph.
//!
//! This crate defines the values exchanged between a dependency resolver and
//! the result-graph assembler: module version identifiers, requested-module
//! selectors, dependency edge records, the on-disk resolution-record format,
//! and user configuration.
//!
//! This crate is intentionally free of traversal logic.

pub mod config;
pub mod dependency;
pub mod id;
pub mod record;

//! Resolution result assembly.
//!
//! The resolver reports the dependency edges it selected for each module
//! version to a [`collector::EdgeCollector`]. Once resolution finishes, the
//! [`assembler::GraphAssembler`] turns the collected edges into a single
//! [`graph::ResolutionResult`]: one node per module version, outgoing edges in
//! report order, and dependee back-references on every selected module.

pub mod assembler;
pub mod collector;
pub mod error;
pub mod graph;

pub use assembler::GraphAssembler;
pub use collector::EdgeCollector;
pub use error::GraphError;
pub use graph::{DependeeEdge, ModuleVersionResult, ResolutionResult};

use miette::Diagnostic;
use thiserror::Error;

use modgraph_core::id::ModuleVersionId;

/// Failures of result-graph assembly.
///
/// Both variants mean the resolver broke its reporting contract; neither is
/// recoverable by the caller and no partial graph is produced.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum GraphError {
    /// Traversal reached a module that was never recorded.
    #[error("module {id} was reached during assembly but never recorded")]
    #[diagnostic(
        code(modgraph::unregistered_node),
        help("every selected module, including leaves, must be recorded before the result is built")
    )]
    UnregisteredNode { id: ModuleVersionId },

    /// The result was requested before a root module was started.
    #[error("no root module: start() was never called")]
    #[diagnostic(code(modgraph::not_started))]
    NotStarted,
}

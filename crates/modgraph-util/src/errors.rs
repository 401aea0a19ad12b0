use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for loading records and configuration.
///
/// Assembly failures are reported as `modgraph_resolver::GraphError`.
#[derive(Debug, Error, Diagnostic)]
pub enum ModgraphError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed resolution-record file.
    #[error("Invalid resolution record: {message}")]
    #[diagnostic(help(
        "Each dependency needs a `requested` coordinate and exactly one of `selected` or `failure`"
    ))]
    Record { message: String },

    /// Unreadable or unparsable configuration file.
    #[error("Config error: {message}")]
    #[diagnostic(help("Check modgraph.toml for syntax errors"))]
    Config { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type ModgraphResult<T> = miette::Result<T>;

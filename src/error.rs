//! Error types for Conduit
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for Conduit operations
pub type ConduitResult<T> = Result<T, ConduitError>;

/// Main error type for Conduit operations
///
/// Every variant aborts the asset build it occurs in. An unresolvable
/// stylesheet `@import` is deliberately absent: it is passed through.
#[derive(Error, Debug)]
pub enum ConduitError {
    /// A required, depended-on, or top-level path could not be resolved
    #[error("asset '{path}' not found")]
    NotFound { path: String },

    /// Header names a directive with no registered handler
    #[error("undefined directive \"{directive}\" in {}", file.display())]
    UndefinedDirective { directive: String, file: PathBuf },

    /// Directive arguments could not be tokenized
    #[error("malformed directive arguments in {}:{line}: {message}", file.display())]
    MalformedArguments {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// A configured processor could not be constructed or fed
    #[error("invalid processor '{name}': {reason}")]
    InvalidProcessorSpec { name: String, reason: String },

    /// A require or import chain re-entered a file still being built
    #[error("cyclic dependency on {}", path.display())]
    CyclicDependency { path: PathBuf },

    /// A processor ran but reported failure
    #[error("processor '{processor}' failed on {}: {message}", file.display())]
    ProcessorFailed {
        processor: String,
        file: PathBuf,
        message: String,
    },

    /// The asset's content type has no HTML tag form
    #[error("no tag for content type of '{path}'")]
    UnsupportedContentType { path: String },

    /// The manifest document exists but could not be read or parsed
    #[error("invalid manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// The configuration file could not be parsed
    #[error("invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConduitError {
    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }
}

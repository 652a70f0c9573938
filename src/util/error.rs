// logreach - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors keep the causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all logreach operations.
#[derive(Debug)]
pub enum ExtractError {
    /// An input log path does not exist.
    ///
    /// Raised per input path, logged, and suppressed by the orchestrator so
    /// the remaining paths are still processed. Never raised for paths
    /// matching the tolerated-missing pattern.
    FileNotFound { path: PathBuf },

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// The external search utility could not be launched.
    SearchSpawn {
        program: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    /// JSON serialisation of the result failed.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A window bound does not match the fixed timestamp format.
    /// Raised only at the CLI boundary; the core never validates bounds.
    InvalidTimestamp { value: String },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => {
                write!(f, "File not found: {}", path.display())
            }
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::SearchSpawn {
                program,
                path,
                source,
            } => write!(
                f,
                "Failed to launch {program} for '{}': {source}",
                path.display()
            ),
            Self::Json { path, source } => {
                write!(f, "JSON output error '{}': {source}", path.display())
            }
            Self::InvalidTimestamp { value } => write!(
                f,
                "'{value}' is not a timestamp of the form YYYY-MM-DDTHH:MM:SS"
            ),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::SearchSpawn { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for logreach results.
pub type Result<T> = std::result::Result<T, ExtractError>;

//! Structured error types for the pea workspace.

use thiserror::Error;

/// Unified error type for all pea operations.
#[derive(Debug, Error)]
pub enum PeaError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed FASTQ or CSV input)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The target sequence occurs on neither strand of the amplicon.
    #[error("cannot find the target sequence {target} in the amplicon sequence {amplicon}")]
    TargetNotFound { target: String, amplicon: String },

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl PeaError {
    /// Wrap an I/O error with the path that caused it.
    pub fn io_at(path: &std::path::Path, e: std::io::Error) -> Self {
        PeaError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    }
}

/// Convenience alias used throughout the pea workspace.
pub type Result<T> = std::result::Result<T, PeaError>;

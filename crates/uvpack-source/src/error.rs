//! Source acquisition error types.

use std::path::PathBuf;

/// Errors that can occur while acquiring and verifying source code.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The named archive or source directory does not exist.
    #[error("source not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Archive contents do not match the recipe's expected digest.
    #[error("checksum mismatch for {}: expected {expected}, got {actual}", path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// The expected digest string in the recipe is not a SHA-256 hex digest.
    #[error("invalid sha256 digest: {detail}")]
    InvalidDigest { detail: String },

    /// The external extraction tool failed.
    #[error("archive extraction failed: {detail}")]
    ExtractFailed { detail: String },

    /// I/O error while staging source files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

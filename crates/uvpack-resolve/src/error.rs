//! Artifact resolution error types.

use std::path::PathBuf;

/// Errors that can occur during artifact resolution and staging.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The OS enumeration has no packaging rule for this target.
    #[error("no packaging rule for target OS '{os}'")]
    UnsupportedPlatform { os: String },

    /// An expected build output is absent after the build completed.
    #[error("expected build artifact missing: {}", path.display())]
    ArtifactMissing { path: PathBuf },

    /// I/O error while staging package files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the package manifest.
    #[error("manifest serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

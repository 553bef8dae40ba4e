//! Build orchestration error types.

/// Errors that can occur while planning or running the external build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A required external tool is not on PATH.
    #[error("required build tool not found: {name}")]
    ToolNotFound { name: String },

    /// The platform has no usable build plan.
    #[error("cannot plan build: {detail}")]
    Unsupported { detail: String },

    /// An external build step exited non-zero.
    #[error("build command failed ({command}): exit code {}", code.map(|c| c.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    CommandFailed { command: String, code: Option<i32> },

    /// I/O error launching a build step.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

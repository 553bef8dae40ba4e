//! Error types for platform descriptor operations.

/// Errors that can occur while constructing or validating a platform
/// descriptor. All of these are configuration errors: they are raised
/// before any build step runs.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// Operating system name not in the supported set.
    #[error("unknown operating system: '{name}'")]
    UnknownOs { name: String },

    /// Architecture name not in the supported set.
    #[error("unknown architecture: '{name}'")]
    UnknownArch { name: String },

    /// Compiler family name not in the supported set.
    #[error("unknown compiler: '{name}'")]
    UnknownCompiler { name: String },

    /// Descriptor string did not match `<os>-<arch>-<compiler><version>`.
    #[error("invalid platform descriptor: {detail}")]
    InvalidDescriptor { detail: String },

    /// Compiler version below the minimum this package supports.
    #[error("{family} {version} is not supported (minimum: {family} {minimum})")]
    UnsupportedCompiler {
        family: String,
        version: semver::Version,
        minimum: semver::Version,
    },

    /// Compiler version string could not be parsed.
    #[error("invalid compiler version: {0}")]
    Version(#[from] semver::Error),
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

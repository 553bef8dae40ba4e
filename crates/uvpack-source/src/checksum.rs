//! SHA-256 integrity verification for source archives.

use std::fmt;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, SourceError};

/// A SHA-256 digest as a lowercase hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Parse an expected digest from a recipe. Must be 64 hex characters.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        if s.len() != 64 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SourceError::InvalidDigest {
                detail: format!("'{s}' is not a 64-character hex string"),
            });
        }
        Ok(Sha256Digest(s))
    }

    /// Compute the digest of the given data.
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();
        Sha256Digest(hex_encode(&result))
    }

    /// Compute the digest of a file's contents.
    pub fn compute_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Sha256Digest::compute(&data))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify that the given data matches this digest.
    pub fn verify(&self, data: &[u8]) -> bool {
        Sha256Digest::compute(data) == *self
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encode bytes as lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

//! Source acquisition for uvpack.
//!
//! A recipe names its upstream source as either a release archive with an
//! expected SHA-256 digest or an already-unpacked directory. The archive
//! digest is verified before anything else happens: a mismatch aborts the
//! invocation with no build attempted.

pub mod checksum;
pub mod error;
pub mod fetch;

pub use checksum::Sha256Digest;
pub use error::{Result, SourceError};
pub use fetch::{acquire, SourceRef};

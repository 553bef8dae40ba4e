//! Target platform descriptor model for uvpack.
//!
//! A build invocation is described by a single immutable value:
//! OS + architecture + compiler (family and version) + link mode.
//! The descriptor is constructed once, validated before any build step,
//! and passed by reference through the rest of the pipeline.

pub mod compiler;
pub mod descriptor;
pub mod error;
pub mod os;

pub use compiler::{Compiler, CompilerFamily};
pub use descriptor::{LinkMode, PlatformDescriptor};
pub use error::{PlatformError, Result};
pub use os::{Arch, TargetOs};

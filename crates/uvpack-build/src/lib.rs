//! External build orchestration for uvpack.
//!
//! The wrapped library is compiled by an external toolchain; this crate
//! only decides which generator drives it (GYP+ninja, or CMake where GYP
//! cannot run), assembles the command lines, and forwards a non-zero exit
//! from any step as a fatal error.

pub mod error;
pub mod generator;
pub mod runner;

pub use error::{BuildError, Result};
pub use generator::{plan, BuildPlan, CommandSpec, Generator};
pub use runner::{ensure_tool, run};

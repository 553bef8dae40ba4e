//! CLI command implementations.

pub mod clean;
pub mod doctor;
pub mod package;
pub mod resolve;

//! CLI command implementations.

pub mod build;
pub mod flags;
pub mod targets;

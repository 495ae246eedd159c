//! CLI command implementations.

pub mod common;
pub mod curve;
pub mod info;
pub mod presets;
pub mod process;

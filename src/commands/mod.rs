//! CLI command implementations.

pub mod harvest;

pub use harvest::{write_output, HarvestCommand};

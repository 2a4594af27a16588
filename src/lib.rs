//! atrezzo-harvester - Sequential, throttled product catalog harvester
//!
//! Walks the paginated shop listing one page at a time and collects one
//! record per product card.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;

pub use catalog::{Catalog, Harvester, ProductRecord, StopReason};
pub use config::Config;
pub use error::HarvestError;

//! Catalog-specific modules for HTTP fetching, parsing, and the harvest loop.

pub mod client;
pub mod harvester;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{CatalogClient, CatalogSource};
pub use harvester::Harvester;
pub use models::{Catalog, PageRequest, PageResponse, ProductRecord, StopReason};
pub use parser::Parser;

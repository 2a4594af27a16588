//! Harvest command implementation.

use crate::catalog::{Catalog, CatalogClient, CatalogSource, Harvester};
use crate::config::Config;
use crate::error::HarvestError;
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Runs a harvest and renders the resulting catalog.
pub struct HarvestCommand {
    config: Config,
}

impl HarvestCommand {
    /// Creates a new harvest command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Harvests up to `config.max_pages` pages and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_source(client).await
    }

    /// Harvests from a provided page source (for testing).
    pub async fn execute_with_source(&self, source: impl CatalogSource) -> Result<String> {
        let catalog = self.collect(source).await;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_catalog(&catalog))
    }

    /// Harvests from `source` without formatting.
    pub async fn collect(&self, source: impl CatalogSource) -> Catalog {
        info!("Harvesting up to {} pages", self.config.max_pages);

        let harvester = Harvester::new(source, &self.config);
        harvester.harvest(self.config.max_pages).await
    }
}

/// Writes rendered output to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, contents: &str) -> Result<(), HarvestError> {
    let to_error = |source| HarvestError::Output { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(to_error)?;
        }
    }

    let mut contents = contents.to_string();
    if !contents.ends_with('\n') {
        contents.push('\n');
    }

    std::fs::write(path, contents).map_err(to_error)?;
    info!("Wrote output to {}", path.display());
    Ok(())
}

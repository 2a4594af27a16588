//! HTTP client for shop listing pages using wreq for TLS fingerprint emulation.

use crate::catalog::models::{PageRequest, PageResponse};
use crate::config::Config;
use crate::error::{validate_base_url, HarvestError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use wreq::Client;
use wreq_util::Emulation;

/// Source of listing pages - enables mocking for tests.
///
/// An `Err` means no response was obtained at all. Any HTTP status,
/// including failures, comes back as `Ok` so the caller can decide.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse>;
}

/// Shop HTTP client with browser impersonation.
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Creates a client for `config.base_url`.
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        Self::with_base_url(config, &config.base_url)
    }

    /// Creates a client for an explicit base URL (used for testing).
    pub fn with_base_url(config: &Config, base_url: &str) -> Result<Self, HarvestError> {
        validate_base_url(base_url)?;

        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            builder = builder.proxy(wreq::Proxy::all(proxy_url)?);
        }

        Ok(Self { client: builder.build()?, base_url: base_url.to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse> {
        let url = request.url(&self.base_url);
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .emulation(Emulation::Chrome131)
            .send()
            .await
            .with_context(|| format!("Failed to send request for page {}", request.page))?;

        let status = response.status().as_u16();
        let body = response.text().await.context("Failed to read response body")?;

        Ok(PageResponse::new(status, body))
    }
}

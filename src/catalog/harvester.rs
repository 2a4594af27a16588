//! Sequential fetch/parse/accumulate loop over the shop listing.

use crate::catalog::client::CatalogSource;
use crate::catalog::models::{Catalog, PageRequest, StopReason};
use crate::catalog::parser::Parser;
use crate::config::Config;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Walks listing pages one at a time and collects every product card.
///
/// The harvester keeps only its settings; each [`Harvester::harvest`] call
/// starts from an empty catalog.
pub struct Harvester<S> {
    source: S,
    parser: Parser,
    page_size: u32,
    search_terms: String,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl<S: CatalogSource> Harvester<S> {
    /// Creates a harvester reading pages from `source`.
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            parser: Parser::new(config.image_origin.clone()),
            page_size: config.page_size,
            search_terms: config.search_terms.clone(),
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        }
    }

    /// Visits pages `1..=max_pages` in order and returns what was collected.
    ///
    /// Stops at the first page that fails to fetch or answers with anything
    /// other than 200; the records gathered so far are kept and the failing
    /// page is recorded in [`Catalog::stop`]. Never fails as a whole.
    pub async fn harvest(&self, max_pages: i64) -> Catalog {
        let mut catalog = Catalog::new();
        let last_page = u32::try_from(max_pages.max(0)).unwrap_or(u32::MAX);

        for page in 1..=last_page {
            debug!("Fetching page {}/{}", page, last_page);

            let request = PageRequest::new(page)
                .with_page_size(self.page_size)
                .with_search_terms(self.search_terms.as_str());

            let response = match self.source.fetch_page(&request).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Could not fetch page {}: {:#}", page, e);
                    catalog.stop = Some(StopReason::Transport { page, message: format!("{:#}", e) });
                    break;
                }
            };

            info!("{}", status_line(page, last_page, response.status));

            if !response.is_success() {
                warn!("Could not retrieve page {}. Status code: {}", page, response.status);
                catalog.stop = Some(StopReason::Status { page, status: response.status });
                break;
            }

            let records = self.parser.parse_page(&response.body);
            debug!("Page {} yielded {} products", page, records.len());
            catalog.push_page(records);

            // Every usable page is followed by the pause, the last one included
            self.throttle().await;
        }

        info!(
            "Harvested {} products from {} pages{}",
            catalog.len(),
            catalog.pages_fetched,
            if catalog.stopped_early() { " (stopped early)" } else { "" }
        );

        catalog
    }

    /// Pauses after a page so the shop is never hit back to back.
    async fn throttle(&self) {
        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        if total_delay == 0 {
            return;
        }

        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }

    /// Returns the underlying page source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Per-page progress line, e.g. `Page 3/100 response status: 200`.
fn status_line(page: u32, last_page: u32, status: u16) -> String {
    format!("Page {}/{} response status: {}", page, last_page, status)
}

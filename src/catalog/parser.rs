//! HTML parser for shop listing pages.

use crate::catalog::models::ProductRecord;
use crate::catalog::selectors;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

/// Origin prefixed to relative image paths.
pub const DEFAULT_IMAGE_ORIGIN: &str = "https://atrezzovazquez.es/";

/// Parser for shop listing pages.
pub struct Parser {
    image_origin: String,
}

impl Parser {
    /// Creates a parser that resolves image paths against `image_origin`.
    pub fn new(image_origin: impl Into<String>) -> Self {
        Self { image_origin: image_origin.into() }
    }

    /// Parses every product card on a page, in document order.
    ///
    /// Markup that is not HTML at all simply yields no cards.
    pub fn parse_page(&self, html: &str) -> Vec<ProductRecord> {
        let document = Html::parse_document(html);

        let records: Vec<ProductRecord> = document
            .select(&selectors::CARD)
            .map(|card| {
                let record = self.parse_card(card);
                trace!("Parsed card: {:?}", record.name);
                record
            })
            .collect();

        debug!("Parsed {} product cards", records.len());
        records
    }

    /// Extracts the six fields of one card. Each lookup stands alone.
    fn parse_card(&self, card: ElementRef) -> ProductRecord {
        ProductRecord {
            name: text_of(card, &selectors::NAME),
            category: text_of(card, &selectors::CATEGORY),
            section: text_of(card, &selectors::SECTION),
            description: text_of(card, &selectors::DESCRIPTION),
            dimensions: text_of(card, &selectors::DIMENSIONS),
            image_url: self.image_of(card),
        }
    }

    /// Resolves the first image's `src` against the configured origin.
    fn image_of(&self, card: ElementRef) -> Option<String> {
        let src = card.select(&selectors::IMAGE).next()?.value().attr(selectors::IMAGE_SRC_ATTR)?;
        if src.is_empty() {
            return None;
        }
        Some(resolve_image_url(&self.image_origin, src))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_ORIGIN)
    }
}

/// Joins origin and path verbatim, without any normalisation.
pub fn resolve_image_url(origin: &str, path: &str) -> String {
    format!("{}{}", origin, path)
}

/// Text of the first element matching `selector` under `scope`.
///
/// Each text node is trimmed and the pieces are concatenated with no
/// separator. Returns `None` on a miss or when the element holds only
/// whitespace.
fn text_of(scope: ElementRef, selector: &Selector) -> Option<String> {
    let element = scope.select(selector).next()?;
    let text: String = element.text().map(str::trim).collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

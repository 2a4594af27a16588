//! Data models for catalog pages, product records, and harvest results.

use serde::{Deserialize, Serialize};

/// Default number of products requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 48;

/// One page of the shop listing to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page index
    pub page: u32,
    /// Products per page
    pub page_size: u32,
    /// Free-text search term (empty lists the whole catalog)
    pub search_terms: String,
}

impl PageRequest {
    /// Creates a request for the given page with the default listing parameters.
    pub fn new(page: u32) -> Self {
        Self { page, page_size: DEFAULT_PAGE_SIZE, search_terms: String::new() }
    }

    /// Overrides the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Overrides the search term.
    pub fn with_search_terms(mut self, terms: impl Into<String>) -> Self {
        self.search_terms = terms.into();
        self
    }

    /// Builds the full listing URL against `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/shop.php?search_type=-1&search_terms={}&limit={}&page={}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(&self.search_terms),
            self.page_size,
            self.page
        )
    }
}

/// Raw result of fetching one page.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl PageResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// Only a plain 200 counts as a usable page.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// One catalog item. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product name
    pub name: Option<String>,
    /// Category tag
    pub category: Option<String>,
    /// Section / section-category label
    pub section: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Dimensions (rendered in the card's price slot)
    pub dimensions: Option<String>,
    /// Absolute image URL
    pub image_url: Option<String>,
}

impl ProductRecord {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 6] =
        ["name", "category", "section", "description", "dimensions", "image_url"];

    /// Field values in the same order as [`Self::COLUMNS`].
    pub fn fields(&self) -> [Option<&str>; 6] {
        [
            self.name.as_deref(),
            self.category.as_deref(),
            self.section.as_deref(),
            self.description.as_deref(),
            self.dimensions.as_deref(),
            self.image_url.as_deref(),
        ]
    }

    /// Returns true if no field could be extracted.
    pub fn is_blank(&self) -> bool {
        self.fields().iter().all(Option::is_none)
    }
}

/// Why a harvest ended before exhausting its page budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopReason {
    /// The server answered with a non-success status.
    Status { page: u32, status: u16 },
    /// The request never produced a response.
    Transport { page: u32, message: String },
}

impl StopReason {
    /// Page index that failed.
    pub fn page(&self) -> u32 {
        match self {
            StopReason::Status { page, .. } | StopReason::Transport { page, .. } => *page,
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Status { page, status } => {
                write!(f, "page {} returned status {}", page, status)
            }
            StopReason::Transport { page, message } => {
                write!(f, "page {} could not be fetched: {}", page, message)
            }
        }
    }
}

/// Ordered output of one harvest run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Records in page order, then document order
    pub records: Vec<ProductRecord>,
    /// Number of pages fetched and parsed successfully
    pub pages_fetched: u32,
    /// Set when the run stopped on a failing page
    pub stop: Option<StopReason>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one page worth of records.
    pub fn push_page(&mut self, records: Vec<ProductRecord>) {
        self.records.extend(records);
        self.pages_fetched += 1;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if the run ended on a failing page.
    pub fn stopped_early(&self) -> bool {
        self.stop.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(name: &str) -> ProductRecord {
        ProductRecord { name: Some(name.to_string()), ..Default::default() }
    }

    #[test]
    fn test_page_request_url_defaults() {
        let request = PageRequest::new(3);
        assert_eq!(
            request.url("https://atrezzovazquez.es"),
            "https://atrezzovazquez.es/shop.php?search_type=-1&search_terms=&limit=48&page=3"
        );
    }

    #[test]
    fn test_page_request_url_trailing_slash() {
        let request = PageRequest::new(1);
        assert_eq!(
            request.url("http://localhost:8080/"),
            "http://localhost:8080/shop.php?search_type=-1&search_terms=&limit=48&page=1"
        );
    }

    #[test]
    fn test_page_request_url_overrides() {
        let request = PageRequest::new(2).with_page_size(12).with_search_terms("silla roja");
        assert_eq!(
            request.url("https://atrezzovazquez.es"),
            "https://atrezzovazquez.es/shop.php?search_type=-1&search_terms=silla%20roja&limit=12&page=2"
        );
    }

    #[test]
    fn test_page_response_success() {
        assert!(PageResponse::new(200, "").is_success());
        assert!(!PageResponse::new(204, "").is_success());
        assert!(!PageResponse::new(404, "").is_success());
        assert!(!PageResponse::new(503, "").is_success());
    }

    #[test]
    fn test_record_fields_order() {
        let record = ProductRecord {
            name: Some("Silla".to_string()),
            category: None,
            section: Some("Mobiliario".to_string()),
            description: None,
            dimensions: Some("40x40".to_string()),
            image_url: None,
        };
        assert_eq!(
            record.fields(),
            [Some("Silla"), None, Some("Mobiliario"), None, Some("40x40"), None]
        );
        assert!(!record.is_blank());
        assert!(ProductRecord::default().is_blank());
    }

    #[test]
    fn test_record_serializes_missing_as_null() {
        let record = make_record("Lampara");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Lampara");
        assert!(json["image_url"].is_null());
        assert!(json["category"].is_null());
    }

    #[test]
    fn test_catalog_push_page() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());

        catalog.push_page(vec![make_record("a"), make_record("b")]);
        catalog.push_page(Vec::new());
        catalog.push_page(vec![make_record("c")]);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.pages_fetched, 3);
        let names: Vec<_> = catalog.records.iter().map(|r| r.name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(!catalog.stopped_early());
    }

    #[test]
    fn test_stop_reason_display() {
        let status = StopReason::Status { page: 3, status: 404 };
        assert_eq!(status.to_string(), "page 3 returned status 404");
        assert_eq!(status.page(), 3);

        let transport = StopReason::Transport { page: 1, message: "connection refused".into() };
        assert_eq!(transport.to_string(), "page 1 could not be fetched: connection refused");
        assert_eq!(transport.page(), 1);
    }

    #[test]
    fn test_stop_reason_serde() {
        let stop = StopReason::Status { page: 2, status: 500 };
        let json = serde_json::to_string(&stop).unwrap();
        assert_eq!(json, r#"{"kind":"status","page":2,"status":500}"#);
    }
}

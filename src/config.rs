//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::catalog::models::DEFAULT_PAGE_SIZE;
use crate::catalog::parser::DEFAULT_IMAGE_ORIGIN;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site the listing pages are fetched from
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Origin prefixed to relative image paths
    #[serde(default = "default_image_origin")]
    pub image_origin: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Pause after each successful page in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to the pause (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Upper bound on pages visited; non-positive visits none
    #[serde(default = "default_max_pages")]
    pub max_pages: i64,

    /// Products requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Search term sent with every listing request
    #[serde(default)]
    pub search_terms: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_base_url() -> String {
    "https://atrezzovazquez.es".to_string()
}

fn default_image_origin() -> String {
    DEFAULT_IMAGE_ORIGIN.to_string()
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_max_pages() -> i64 {
    100
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_origin: default_image_origin(),
            proxy: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: 0,
            max_pages: default_max_pages(),
            page_size: default_page_size(),
            search_terms: String::new(),
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("atrezzo-harvester").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparseable values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("ATREZZO_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(proxy) = std::env::var("ATREZZO_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("ATREZZO_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(pages) = std::env::var("ATREZZO_PAGES") {
            if let Ok(p) = pages.parse() {
                self.max_pages = p;
            }
        }

        self
    }
}

/// Output format for the harvested catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

//! atrezzo-harvester - Sequential, throttled product catalog harvester
//!
//! Fetches the shop listing page by page and prints one row per product.

use anyhow::Result;
use atrezzo_harvester::commands::{write_output, HarvestCommand};
use atrezzo_harvester::config::{Config, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "atrezzo-harvester",
    version,
    about = "Sequential, throttled product catalog harvester",
    long_about = "Walks the paginated Atrezzo Vazquez shop listing one page at a time and collects name, category, section, description, dimensions and image URL for every product."
)]
struct Cli {
    /// Site to harvest from
    #[arg(long, global = true, env = "ATREZZO_BASE_URL")]
    base_url: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "ATREZZO_PROXY")]
    proxy: Option<String>,

    /// Delay between pages in milliseconds
    #[arg(long, global = true, env = "ATREZZO_DELAY")]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest the catalog
    #[command(alias = "h")]
    Harvest {
        /// Maximum number of pages to visit
        #[arg(short, long, env = "ATREZZO_PAGES", allow_negative_numbers = true)]
        pages: Option<i64>,

        /// Search term sent with every listing request
        #[arg(long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the dataset
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Harvest { pages, search } => {
            if let Some(pages) = pages {
                config.max_pages = pages;
            }
            if let Some(search) = search {
                config.search_terms = search;
            }

            let cmd = HarvestCommand::new(config);
            let output = cmd.execute().await?;

            match cli.output {
                Some(path) => write_output(&path, &output)?,
                None => println!("{}", output),
            }
        }
    }

    Ok(())
}

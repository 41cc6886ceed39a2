// Lead collection CLI
//
// Searches the map listing view for each query, visits every result and its
// website, generates an outreach opener per lead and writes the table.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kodegen_tools_leadscrape::utils::{
    DEFAULT_MAX_CONCURRENT_PAGES, DEFAULT_MODEL, DEFAULT_OUTPUT_FILE, DEFAULT_SCROLL_COUNT,
};
use kodegen_tools_leadscrape::{PipelineConfig, ShutdownSignal};

/// 128 + SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 130;

const DEFAULT_QUERIES: [&str; 2] = ["Dentist in Miami, FL", "Cosmetic Dentistry Los Angeles"];

#[derive(Debug, Parser)]
#[command(name = "kodegen-leadscrape")]
#[command(about = "Collect, enrich and write business leads from map listings")]
struct Cli {
    /// Search queries; defaults to the built-in dental searches
    queries: Vec<String>,

    /// Run Chrome without a window
    #[arg(long, env = "HEADLESS", default_value_t = true, action = clap::ArgAction::Set)]
    headless: bool,

    #[arg(long, env = "MAX_CONCURRENT_PAGES", default_value_t = DEFAULT_MAX_CONCURRENT_PAGES)]
    max_concurrent_pages: usize,

    #[arg(long, env = "SCROLL_COUNT", default_value_t = DEFAULT_SCROLL_COUNT)]
    scroll_count: u32,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Output file (`.json` for JSON, anything else for CSV)
    #[arg(short, long, env = "LEADS_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,
}

impl Cli {
    fn into_config(self) -> Result<PipelineConfig> {
        let queries = if self.queries.is_empty() {
            DEFAULT_QUERIES.iter().map(|q| (*q).to_string()).collect()
        } else {
            self.queries
        };

        PipelineConfig::builder()
            .queries(queries)
            .headless(self.headless)
            .max_concurrent_pages(self.max_concurrent_pages)
            .scroll_count(self.scroll_count)
            .model(self.model)
            .api_key(self.api_key)
            .output_path(self.output)
            .build()
            .context("Invalid configuration")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Cli::parse().into_config()?;
    let output = config.output_path().to_path_buf();

    let shutdown = ShutdownSignal::new();
    tokio::spawn(shutdown.clone().watch(
        || async { tokio::signal::ctrl_c().await.is_ok() },
        || std::process::exit(INTERRUPTED_EXIT_CODE),
    ));

    let report = kodegen_tools_leadscrape::run(config, shutdown)
        .await
        .context("Lead collection failed")?;

    match report.rows_written {
        Some(rows) => println!("Saved {rows} leads to {}", output.display()),
        None => println!("No leads found; nothing written"),
    }
    if report.interrupted {
        println!("Run was interrupted; output contains a partial result");
    }

    Ok(())
}

//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetch` trait, with timeouts and cancellation
//! - HTML link extraction and sitemap discovery
//! - The frontier engine's admission rules
//! - Overall crawl coordination

mod coordinator;
mod discovery;
pub(crate) mod fetcher;
mod frontier;
mod parser;
mod sitemap;

pub use coordinator::{Coordinator, CrawlReport, Termination};
pub use discovery::discover_links;
pub use fetcher::{build_http_client, Fetch, FetchError, FetchedPage, HttpFetcher, Interruptible};
pub use frontier::FrontierEngine;
pub use parser::extract_links;
pub use sitemap::{page_urls_from_sitemap, sitemap_urls_from_robots};

use crate::config::Config;
use crate::CrawlError;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration
/// 2. Open the crawl-record store
/// 3. Build the HTTP client
/// 4. Seed the frontier and crawl until the bound or an empty frontier
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `cancel` - Token that stops the run early when triggered
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawled set and why the run stopped
/// * `Err(CrawlError)` - The run could not start
///
/// # Example
///
/// ```no_run
/// use frontier_crawler::config::Config;
/// use frontier_crawler::crawler::crawl;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = crawl(&Config::default(), CancellationToken::new()).await?;
/// println!("{} URLs crawled", report.crawled.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config, cancel: CancellationToken) -> Result<CrawlReport, CrawlError> {
    let mut coordinator = Coordinator::from_config(config, cancel)?;
    coordinator.run().await
}

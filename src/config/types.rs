use crate::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for the crawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// URL the crawl starts from
    pub seed: String,

    /// Maximum number of URLs in the final crawled set
    #[serde(rename = "max-crawled-url")]
    pub max_crawled_url: usize,

    /// Seconds to wait before each page or sitemap fetch
    #[serde(rename = "politeness-criterion")]
    pub politeness_criterion: f64,

    /// Maximum links admitted to the frontier from a single page
    #[serde(rename = "max-url-by-pages")]
    pub max_url_by_pages: usize,

    /// Whether to admit URLs listed in the sitemaps declared by robots.txt
    #[serde(rename = "explore-sitemaps")]
    pub explore_sitemaps: bool,

    /// Maximum links admitted per sitemap pass (across all sitemaps of a site)
    #[serde(rename = "max-url-by-sitemaps")]
    pub max_url_by_sitemaps: usize,

    /// Per-fetch timeout in seconds (robots.txt, pages and sitemaps)
    #[serde(rename = "fetch-timeout")]
    pub fetch_timeout: u64,

    /// Seconds an in-flight fetch may keep running after cancellation
    #[serde(rename = "cancel-grace")]
    pub cancel_grace: u64,

    /// Resolve relative hrefs against the page URL instead of discarding them
    #[serde(rename = "resolve-relative-links")]
    pub resolve_relative_links: bool,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed: "https://ensai.fr".to_string(),
            max_crawled_url: 50,
            politeness_criterion: 3.0,
            max_url_by_pages: 5,
            explore_sitemaps: false,
            max_url_by_sitemaps: 0,
            fetch_timeout: 30,
            cancel_grace: 5,
            resolve_relative_links: false,
            user_agent: concat!("frontier-crawler/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CrawlerConfig {
    /// The politeness delay as a `Duration`
    ///
    /// Fails for negative, non-finite or out-of-range values.
    pub fn politeness_delay(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(self.politeness_criterion).map_err(|_| {
            ConfigError::Validation(format!(
                "politeness_criterion must be a non-negative number of seconds, got {}",
                self.politeness_criterion
            ))
        })
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite database holding last-crawl timestamps
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the newline-delimited crawled URL list
    #[serde(rename = "crawled-path")]
    pub crawled_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "age_db.db".to_string(),
            crawled_path: "crawled_webpages.txt".to_string(),
        }
    }
}

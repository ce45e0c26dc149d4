//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The `Fetch` capability every adapter goes through
//! - Building the reqwest client with user agent and per-fetch timeout
//! - Error classification into `FetchError`
//! - Abandoning in-flight fetches after cancellation

use crate::config::CrawlerConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Why a single fetch (page, robots.txt or sitemap) produced nothing usable
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("Failed to parse {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Fetch of {url} abandoned after cancellation")]
    Cancelled { url: String },
}

impl FetchError {
    /// Short failure class for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Network { .. } => "network",
            Self::Status { .. } => "status",
            Self::ContentMismatch { .. } => "content_mismatch",
            Self::Body { .. } => "body",
            Self::Parse { .. } => "parse",
            Self::Cancelled { .. } => "cancelled",
        }
    }
}

/// A completed HTTP exchange
///
/// Any status code is a successful fetch at this level; callers decide what
/// a 404 or a 503 means for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value, if sent
    pub content_type: Option<String>,
    /// Response body
    pub body: String,
}

impl FetchedPage {
    /// Returns true for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true unless a Content-Type was sent and it is not HTML
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map_or(true, |ct| ct.to_ascii_lowercase().contains("html"))
    }
}

/// The GET capability used for pages, robots.txt and sitemaps
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// Fetches `url`, returning the response or a classified failure
    async fn get(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

impl<F: Fetch> Fetch for &F {
    async fn get(&self, url: &str) -> Result<FetchedPage, FetchError> {
        (**self).get(url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header value
/// * `timeout` - Total time allowed for one request, body included
///
/// # Example
///
/// ```no_run
/// use frontier_crawler::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("frontier-crawler/0.1", Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed `Fetch` implementation
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.fetch_timeout),
        )?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        Ok(FetchedPage {
            final_url,
            status,
            content_type,
            body,
        })
    }
}

/// Maps a reqwest send error onto the fetch taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

/// Races every fetch of the wrapped fetcher against a cancellation token
///
/// Once the token fires, fetches already in flight get `grace` to finish and
/// are then abandoned with `FetchError::Cancelled`. New fetches are refused.
pub struct Interruptible<'a, F> {
    inner: &'a F,
    cancel: &'a CancellationToken,
    grace: Duration,
}

impl<'a, F: Fetch> Interruptible<'a, F> {
    pub fn new(inner: &'a F, cancel: &'a CancellationToken, grace: Duration) -> Self {
        Self {
            inner,
            cancel,
            grace,
        }
    }
}

impl<F: Fetch> Fetch for Interruptible<'_, F> {
    async fn get(&self, url: &str) -> Result<FetchedPage, FetchError> {
        if self.cancel.is_cancelled() {
            return Err(FetchError::Cancelled {
                url: url.to_string(),
            });
        }

        let grace = self.grace;
        tokio::select! {
            result = self.inner.get(url) => result,
            _ = async {
                self.cancel.cancelled().await;
                tokio::time::sleep(grace).await;
            } => {
                tracing::warn!("Abandoning fetch of {} after {:?} grace period", url, grace);
                Err(FetchError::Cancelled { url: url.to_string() })
            }
        }
    }
}

//! Robots.txt handling module
//!
//! This module fetches, parses and caches robots.txt files, and answers the
//! one question admission needs: may the generic `*` agent fetch this URL?
//!
//! # Fetch outcomes
//!
//! | robots.txt response        | Policy     | Cached |
//! |----------------------------|------------|--------|
//! | 2xx                        | parse body | yes    |
//! | 401 / 403                  | deny all   | yes    |
//! | other 4xx                  | allow all  | yes    |
//! | 5xx, timeout, network, ... | deny       | no     |

mod cache;
mod parser;

pub use cache::CachedRobots;
pub use parser::ParsedRobots;

use crate::crawler::{Fetch, FetchError};
use std::collections::HashMap;

/// User agent token evaluated against robots.txt groups
pub const ROBOTS_AGENT: &str = "*";

/// Fetches and interprets a robots.txt file
///
/// # Arguments
///
/// * `fetcher` - The fetch capability to use
/// * `robots_location` - Absolute URL of the robots.txt file
///
/// # Returns
///
/// * `Ok(ParsedRobots)` - A definitive policy (parsed, allow-all or deny-all)
/// * `Err(FetchError)` - The file could not be retrieved; callers fail closed
pub async fn fetch_robots<F: Fetch>(
    fetcher: &F,
    robots_location: &str,
) -> Result<ParsedRobots, FetchError> {
    let page = fetcher.get(robots_location).await?;

    match page.status {
        200..=299 => Ok(ParsedRobots::from_content(&page.body)),
        401 | 403 => Ok(ParsedRobots::deny_all()),
        400..=499 => Ok(ParsedRobots::allow_all()),
        status => Err(FetchError::Status {
            url: robots_location.to_string(),
            status,
        }),
    }
}

/// Per-run robots.txt cache keyed by robots.txt location
#[derive(Debug, Default)]
pub struct RobotsResolver {
    cache: HashMap<String, CachedRobots>,
}

impl RobotsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks whether `url` may be fetched under the rules at `robots_location`
    ///
    /// The robots.txt file is fetched on first use and cached. Retrieval
    /// failures deny the URL and are not cached, so the next check retries.
    pub async fn is_allowed<F: Fetch>(
        &mut self,
        fetcher: &F,
        url: &str,
        robots_location: &str,
    ) -> bool {
        if let Some(cached) = self.cache.get(robots_location) {
            if !cached.is_stale() {
                return cached.is_allowed(url, ROBOTS_AGENT);
            }
        }

        match fetch_robots(fetcher, robots_location).await {
            Ok(robots) => {
                let allowed = robots.is_allowed(url, ROBOTS_AGENT);
                self.cache
                    .insert(robots_location.to_string(), CachedRobots::new(robots));
                allowed
            }
            Err(e) => {
                tracing::warn!(
                    kind = e.kind(),
                    "robots.txt unavailable at {}, denying {}: {}",
                    robots_location,
                    url,
                    e
                );
                false
            }
        }
    }

    /// Number of robots.txt locations with a cached policy
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fetcher::testing::StaticFetcher;

    const ROBOTS: &str = "https://example.com/robots.txt";

    #[tokio::test]
    async fn test_fetch_robots_parses_success() {
        let fetcher = StaticFetcher::new().text(ROBOTS, "User-agent: *\nDisallow: /private/");
        let robots = fetch_robots(&fetcher, ROBOTS).await.unwrap();
        assert!(robots.is_allowed("https://example.com/public", ROBOTS_AGENT));
        assert!(!robots.is_allowed("https://example.com/private/x", ROBOTS_AGENT));
    }

    #[tokio::test]
    async fn test_fetch_robots_missing_allows_all() {
        let fetcher = StaticFetcher::new();
        let robots = fetch_robots(&fetcher, ROBOTS).await.unwrap();
        assert_eq!(robots, ParsedRobots::allow_all());
    }

    #[tokio::test]
    async fn test_fetch_robots_forbidden_denies_all() {
        for status in [401, 403] {
            let fetcher = StaticFetcher::new().respond(ROBOTS, status, None, "");
            let robots = fetch_robots(&fetcher, ROBOTS).await.unwrap();
            assert_eq!(robots, ParsedRobots::deny_all());
        }
    }

    #[tokio::test]
    async fn test_fetch_robots_server_error_is_error() {
        let fetcher = StaticFetcher::new().respond(ROBOTS, 503, None, "");
        let result = fetch_robots(&fetcher, ROBOTS).await;
        assert!(matches!(result, Err(FetchError::Status { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_resolver_caches_per_location() {
        let fetcher = StaticFetcher::new().text(ROBOTS, "User-agent: *\nDisallow: /private/");
        let mut resolver = RobotsResolver::new();

        assert!(resolver.is_allowed(&fetcher, "https://example.com/a", ROBOTS).await);
        assert!(!resolver.is_allowed(&fetcher, "https://example.com/private/b", ROBOTS).await);
        assert!(resolver.is_allowed(&fetcher, "https://example.com/c", ROBOTS).await);

        assert_eq!(fetcher.calls_to(ROBOTS), 1);
        assert_eq!(resolver.cached_len(), 1);
    }

    #[tokio::test]
    async fn test_resolver_fails_closed_without_caching() {
        let fetcher = StaticFetcher::new().fail(
            ROBOTS,
            FetchError::Timeout {
                url: ROBOTS.to_string(),
            },
        );
        let mut resolver = RobotsResolver::new();

        assert!(!resolver.is_allowed(&fetcher, "https://example.com/a", ROBOTS).await);
        assert!(!resolver.is_allowed(&fetcher, "https://example.com/b", ROBOTS).await);

        assert_eq!(fetcher.calls_to(ROBOTS), 2);
        assert_eq!(resolver.cached_len(), 0);
    }

    #[tokio::test]
    async fn test_resolver_uses_given_location_for_foreign_urls() {
        // A cross-site candidate is judged by the discovering page's rules
        let fetcher = StaticFetcher::new().text(ROBOTS, "User-agent: *\nDisallow: /blocked");
        let mut resolver = RobotsResolver::new();

        assert!(!resolver.is_allowed(&fetcher, "https://other.org/blocked", ROBOTS).await);
        assert!(resolver.is_allowed(&fetcher, "https://other.org/open", ROBOTS).await);
        assert_eq!(fetcher.calls_to("https://other.org/robots.txt"), 0);
    }
}

//! Frontier engine
//!
//! The two admission operations: links found on a page, and URLs listed in
//! the sitemaps a site declares. Both dedup against the current
//! `CrawlState`, stop at their budget, and return only newly admitted URLs
//! in discovery order. The caller merges them into the frontier.

use crate::crawler::discovery::discover_links;
use crate::crawler::fetcher::{Fetch, Interruptible};
use crate::crawler::sitemap::{page_urls_from_sitemap, sitemap_urls_from_robots};
use crate::robots::RobotsResolver;
use crate::state::CrawlState;
use crate::url::is_http_url;
use std::collections::HashSet;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Admission logic plus the resources it needs across a run
pub struct FrontierEngine<F> {
    fetcher: F,
    robots: RobotsResolver,
    politeness: Duration,
    resolve_relative_links: bool,
    cancel: CancellationToken,
    grace: Duration,
}

impl<F: Fetch> FrontierEngine<F> {
    pub fn new(fetcher: F, politeness: Duration, cancel: CancellationToken) -> Self {
        Self {
            fetcher,
            robots: RobotsResolver::new(),
            politeness,
            resolve_relative_links: false,
            cancel,
            grace: Duration::from_secs(5),
        }
    }

    /// Resolve relative hrefs against the page URL instead of dropping them
    pub fn with_relative_links(mut self, resolve: bool) -> Self {
        self.resolve_relative_links = resolve;
        self
    }

    /// Time an in-flight fetch may keep running after cancellation
    pub fn with_cancel_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Admits up to `max` links discovered on `page_url`
    ///
    /// A candidate is admitted if it is neither crawled nor queued, has not
    /// already been admitted by this call, and the robots.txt at
    /// `page_robots` allows it. Candidates past the budget are dropped.
    /// Discovery failures yield an empty list.
    pub async fn admit_from_page(
        &mut self,
        state: &CrawlState,
        page_url: &str,
        page_robots: &str,
        max: usize,
    ) -> Vec<String> {
        if max == 0 {
            return Vec::new();
        }

        if !self.polite_wait().await {
            return Vec::new();
        }

        let fetcher = Interruptible::new(&self.fetcher, &self.cancel, self.grace);

        let candidates = match discover_links(&fetcher, page_url, self.resolve_relative_links).await
        {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!(kind = e.kind(), "No links from {}: {}", page_url, e);
                return Vec::new();
            }
        };

        tracing::debug!("{} candidate links on {}", candidates.len(), page_url);

        let mut admitted = Vec::new();
        let mut seen = HashSet::new();

        for candidate in candidates {
            if self.cancel.is_cancelled() {
                break;
            }
            if !state.is_novel(&candidate) || !seen.insert(candidate.clone()) {
                continue;
            }

            if self
                .robots
                .is_allowed(&fetcher, &candidate, page_robots)
                .await
            {
                tracing::trace!("Admitting {}", candidate);
                admitted.push(candidate);
                if admitted.len() >= max {
                    break;
                }
            } else {
                tracing::debug!("Disallowed by {}: {}", page_robots, candidate);
            }
        }

        admitted
    }

    /// Admits up to `max` URLs in total from the sitemaps declared at `page_robots`
    ///
    /// Sitemap URLs are not checked against robots.txt. A sitemap that fails
    /// to load is skipped; a robots.txt that fails to load yields nothing.
    pub async fn admit_from_sitemaps(
        &mut self,
        state: &CrawlState,
        page_robots: &str,
        max: usize,
    ) -> Vec<String> {
        if max == 0 {
            return Vec::new();
        }

        if !self.polite_wait().await {
            return Vec::new();
        }

        let fetcher = Interruptible::new(&self.fetcher, &self.cancel, self.grace);

        let sitemaps = match sitemap_urls_from_robots(&fetcher, page_robots).await {
            Ok(sitemaps) => sitemaps,
            Err(e) => {
                tracing::debug!(kind = e.kind(), "No sitemaps from {}: {}", page_robots, e);
                return Vec::new();
            }
        };

        let mut admitted = Vec::new();
        let mut seen = HashSet::new();

        'sitemaps: for sitemap in sitemaps {
            let urls = match page_urls_from_sitemap(&fetcher, &sitemap).await {
                Ok(urls) => urls,
                Err(e) => {
                    tracing::warn!(kind = e.kind(), "Skipping sitemap {}: {}", sitemap, e);
                    continue;
                }
            };

            for url in urls {
                if !is_http_url(&url) || !state.is_novel(&url) || !seen.insert(url.clone()) {
                    continue;
                }
                admitted.push(url);
                if admitted.len() >= max {
                    break 'sitemaps;
                }
            }
        }

        tracing::debug!("{} URLs admitted from sitemaps of {}", admitted.len(), page_robots);
        admitted
    }

    /// Sleeps the politeness delay; returns false if cancelled meanwhile
    async fn polite_wait(&self) -> bool {
        if self.politeness.is_zero() {
            return !self.cancel.is_cancelled();
        }

        tokio::select! {
            _ = tokio::time::sleep(self.politeness) => true,
            _ = self.cancel.cancelled() => false,
        }
    }
}

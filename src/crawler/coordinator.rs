//! Crawler coordinator - the crawl driver state machine
//!
//! This module owns the run from start to finish:
//! - Seeding the frontier from the seed page
//! - Processing the frontier one URL at a time until the crawl bound is met
//!   or nothing is left to crawl
//! - Recording crawl timestamps in the store
//! - Stopping early on cancellation or store failure

use crate::config::{validate, Config, CrawlerConfig};
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::frontier::FrontierEngine;
use crate::state::{CrawlPhase, CrawlState};
use crate::storage::{open_storage, CrawlStore, SqliteStorage, StorageError};
use crate::url::robots_location;
use crate::CrawlError;
use chrono::Utc;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Why a run stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// Every admitted URL was processed before reaching the bound
    FrontierExhausted,

    /// The crawled set reached `max-crawled-url`
    LimitReached,

    /// The cancellation token fired
    Cancelled,

    /// A crawl timestamp could not be written
    StoreFailed(String),
}

impl Termination {
    /// Returns true if the run should be reported as failed
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::StoreFailed(_))
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrontierExhausted => write!(f, "frontier exhausted"),
            Self::LimitReached => write!(f, "crawl limit reached"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::StoreFailed(reason) => write!(f, "store failure: {}", reason),
        }
    }
}

/// Outcome of a crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Crawled URLs, sorted
    pub crawled: Vec<String>,
    /// URLs taken from the frontier and processed (the seed excluded)
    pub pages_processed: usize,
    pub admitted_from_pages: usize,
    pub admitted_from_sitemaps: usize,
    pub termination: Termination,
    pub elapsed: Duration,
}

#[derive(Debug, Default)]
struct Counters {
    pages_processed: usize,
    admitted_from_pages: usize,
    admitted_from_sitemaps: usize,
}

/// Main crawler coordinator structure
pub struct Coordinator<F, S> {
    config: CrawlerConfig,
    engine: FrontierEngine<F>,
    store: S,
    state: CrawlState,
    phase: CrawlPhase,
    counters: Counters,
}

impl Coordinator<HttpFetcher, SqliteStorage> {
    /// Builds a coordinator with the HTTP fetcher and the SQLite store
    ///
    /// The configuration is validated before anything is opened.
    pub fn from_config(config: &Config, cancel: CancellationToken) -> Result<Self, CrawlError> {
        validate(config)?;
        let fetcher = HttpFetcher::new(&config.crawler)?;
        let store = open_storage(Path::new(&config.output.database_path))?;
        Self::new(config.crawler.clone(), fetcher, store, cancel)
    }
}

impl<F: Fetch, S: CrawlStore> Coordinator<F, S> {
    /// Creates a coordinator in the `Init` phase with `crawled = {seed}`
    ///
    /// # Errors
    ///
    /// * `CrawlError::Config` if the politeness delay is not a valid duration
    pub fn new(
        config: CrawlerConfig,
        fetcher: F,
        store: S,
        cancel: CancellationToken,
    ) -> Result<Self, CrawlError> {
        let engine = FrontierEngine::new(fetcher, config.politeness_delay()?, cancel)
            .with_relative_links(config.resolve_relative_links)
            .with_cancel_grace(Duration::from_secs(config.cancel_grace));

        let state = CrawlState::new(config.seed.trim());

        Ok(Self {
            config,
            engine,
            store,
            state,
            phase: CrawlPhase::Init,
            counters: Counters::default(),
        })
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fetcher(&self) -> &F {
        self.engine.fetcher()
    }

    /// Runs the crawl to completion
    ///
    /// Fetch failures never end the run. The returned report always carries
    /// the crawled set accumulated so far, including after cancellation or
    /// a store failure.
    ///
    /// # Errors
    ///
    /// * `CrawlError::InvalidTransition` if called on a finished coordinator
    /// * `CrawlError::Url` if the seed is not an http(s) URL with a host
    pub async fn run(&mut self) -> Result<CrawlReport, CrawlError> {
        let started = Instant::now();
        tracing::info!(
            "Starting crawl from {} (max {} URLs, {} per page, sitemaps {})",
            self.config.seed,
            self.config.max_crawled_url,
            self.config.max_url_by_pages,
            if self.config.explore_sitemaps { "on" } else { "off" }
        );

        let termination = self.drive().await?;
        self.transition(CrawlPhase::Done)?;

        tracing::info!(
            "Crawl finished ({}): {} URLs crawled in {:?}",
            termination,
            self.state.crawled_len(),
            started.elapsed()
        );

        Ok(CrawlReport {
            crawled: self.state.crawled_sorted(),
            pages_processed: self.counters.pages_processed,
            admitted_from_pages: self.counters.admitted_from_pages,
            admitted_from_sitemaps: self.counters.admitted_from_sitemaps,
            termination,
            elapsed: started.elapsed(),
        })
    }

    /// Moves through Seeding and Running, returning why the run stopped
    async fn drive(&mut self) -> Result<Termination, CrawlError> {
        let max = self.config.max_crawled_url;
        let seed = self.config.seed.trim().to_string();
        let seed_robots = robots_location(&seed)?;

        if self.state.crawled_len() >= max {
            tracing::info!("Crawl bound of {} already met by the seed", max);
            return Ok(Termination::LimitReached);
        }

        self.transition(CrawlPhase::Seeding)?;

        let admitted = self
            .engine
            .admit_from_page(&self.state, &seed, &seed_robots, self.config.max_url_by_pages)
            .await;
        self.counters.admitted_from_pages += self.state.extend(admitted);
        debug_assert!(self.state.is_disjoint());

        if self.engine.is_cancelled() {
            return Ok(Termination::Cancelled);
        }

        if let Err(e) = self.store.record_crawl(&seed, Utc::now()) {
            return Ok(store_failed(&seed, e));
        }

        self.transition(CrawlPhase::Running)?;

        loop {
            if self.state.crawled_len() >= max {
                return Ok(Termination::LimitReached);
            }

            let Some(url) = self.state.next_pending().map(str::to_string) else {
                return Ok(Termination::FrontierExhausted);
            };

            if self.engine.is_cancelled() {
                return Ok(Termination::Cancelled);
            }

            self.admit_for(&url).await;

            // A page interrupted mid-processing stays uncrawled
            if self.engine.is_cancelled() {
                return Ok(Termination::Cancelled);
            }

            self.state.complete(&url);
            self.counters.pages_processed += 1;

            if let Err(e) = self.store.record_crawl(&url, Utc::now()) {
                return Ok(store_failed(&url, e));
            }

            tracing::info!(
                "{} / {} crawled ({} pending)",
                self.state.crawled_len(),
                max,
                self.state.frontier_len()
            );
        }
    }

    /// Runs the sitemap pass (if enabled) and the page pass for one URL
    async fn admit_for(&mut self, url: &str) {
        let robots = match robots_location(url) {
            Ok(robots) => robots,
            Err(e) => {
                tracing::warn!("Cannot derive robots.txt for {}: {}", url, e);
                return;
            }
        };

        if self.config.explore_sitemaps {
            let admitted = self
                .engine
                .admit_from_sitemaps(&self.state, &robots, self.config.max_url_by_sitemaps)
                .await;
            self.counters.admitted_from_sitemaps += self.state.extend(admitted);
            debug_assert!(self.state.is_disjoint());
        }

        let admitted = self
            .engine
            .admit_from_page(&self.state, url, &robots, self.config.max_url_by_pages)
            .await;
        self.counters.admitted_from_pages += self.state.extend(admitted);
        debug_assert!(self.state.is_disjoint());
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), CrawlError> {
        if !self.phase.can_transition_to(next) {
            return Err(CrawlError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::debug!("Phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

fn store_failed(url: &str, error: StorageError) -> Termination {
    tracing::error!("Failed to record crawl of {}: {}", url, error);
    Termination::StoreFailed(error.to_string())
}

//! The crawler's single unit of mutable state

use std::collections::{HashSet, VecDeque};

/// Crawled set plus pending frontier
///
/// A URL is in at most one of the two collections at any time: `push`
/// refuses anything already crawled or queued, and `complete` moves a URL
/// out of the frontier before inserting it into the crawled set.
#[derive(Debug, Clone, Default)]
pub struct CrawlState {
    crawled: HashSet<String>,
    frontier: VecDeque<String>,
    queued: HashSet<String>,
}

impl CrawlState {
    /// Creates the initial state for a run: `crawled = {seed}`, empty frontier
    pub fn new(seed: &str) -> Self {
        let mut crawled = HashSet::new();
        crawled.insert(seed.to_string());
        Self {
            crawled,
            frontier: VecDeque::new(),
            queued: HashSet::new(),
        }
    }

    /// Returns true if `url` has been crawled (or is the seed)
    pub fn is_crawled(&self, url: &str) -> bool {
        self.crawled.contains(url)
    }

    /// Returns true if `url` is waiting in the frontier
    pub fn is_queued(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    /// Returns true if `url` is neither crawled nor queued
    pub fn is_novel(&self, url: &str) -> bool {
        !self.is_crawled(url) && !self.is_queued(url)
    }

    /// Appends `url` to the frontier
    ///
    /// Returns false (and leaves the state untouched) if the URL is already
    /// crawled or queued.
    pub fn push(&mut self, url: String) -> bool {
        if !self.is_novel(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.frontier.push_back(url);
        true
    }

    /// Appends every URL in `urls`, returning how many were actually added
    pub fn extend<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        urls.into_iter().filter(|url| self.push(url.clone())).count()
    }

    /// The URL at the head of the frontier, left in place while it is processed
    pub fn next_pending(&self) -> Option<&str> {
        self.frontier.front().map(String::as_str)
    }

    /// Moves `url` from the frontier into the crawled set
    ///
    /// Returns false if the URL was not in the frontier.
    pub fn complete(&mut self, url: &str) -> bool {
        if !self.queued.remove(url) {
            return false;
        }
        if let Some(pos) = self.frontier.iter().position(|u| u == url) {
            self.frontier.remove(pos);
        }
        self.crawled.insert(url.to_string());
        true
    }

    /// Number of crawled URLs (seed included)
    pub fn crawled_len(&self) -> usize {
        self.crawled.len()
    }

    /// Number of URLs waiting in the frontier
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Iterates the frontier in crawl order
    pub fn frontier(&self) -> impl Iterator<Item = &str> {
        self.frontier.iter().map(String::as_str)
    }

    /// Returns true if the crawled set and the frontier share no URL
    pub fn is_disjoint(&self) -> bool {
        self.frontier.iter().all(|url| !self.crawled.contains(url))
    }

    /// The crawled set, sorted for stable output
    pub fn crawled_sorted(&self) -> Vec<String> {
        let mut crawled: Vec<String> = self.crawled.iter().cloned().collect();
        crawled.sort();
        crawled
    }
}

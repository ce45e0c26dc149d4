//! Storage traits and error types
//!
//! This module defines the trait interface for the crawl-record store and
//! associated error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid timestamp '{value}' stored for {hash_url}")]
    Timestamp { hash_url: String, value: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistent record of when each URL was last crawled
///
/// Records are keyed by the SHA-256 hex digest of the URL string, one per
/// URL ever crawled. Recording the same URL again overwrites its timestamp.
pub trait CrawlStore {
    /// Upserts the crawl timestamp for `url`
    fn record_crawl(&mut self, url: &str, at: DateTime<Utc>) -> StorageResult<()>;

    /// Returns the most recent crawl timestamp for `url`, if any
    fn last_crawled(&self, url: &str) -> StorageResult<Option<DateTime<Utc>>>;

    /// Counts the number of URLs with a crawl record
    fn count_records(&self) -> StorageResult<u64>;
}

//! Storage module for persisting crawl records
//!
//! The crawler keeps one record per URL ever crawled: the SHA-256 hex digest
//! of the URL string mapped to the timestamp of its most recent crawl.

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{CrawlStore, StorageError, StorageResult};

use sha2::{Digest, Sha256};
use std::path::Path;

/// Opens or creates the crawl-record database at `path`
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    SqliteStorage::new(path)
}

/// Returns the lowercase SHA-256 hex digest of a URL string
///
/// # Examples
///
/// ```
/// use frontier_crawler::storage::url_hash;
///
/// let key = url_hash("https://example.com/");
/// assert_eq!(key.len(), 64);
/// ```
pub fn url_hash(url: &str) -> String {
    hex::encode(Sha256::digest(url.as_bytes()))
}

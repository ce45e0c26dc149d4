//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the CrawlStore trait.

use crate::storage::schema::{initialize_schema, UPSERT_AGE_SQL};
use crate::storage::traits::{CrawlStore, StorageError, StorageResult};
use crate::storage::url_hash;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the database at `path` and ensures the schema exists
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl CrawlStore for SqliteStorage {
    fn record_crawl(&mut self, url: &str, at: DateTime<Utc>) -> StorageResult<()> {
        self.conn
            .execute(UPSERT_AGE_SQL, params![url_hash(url), at.to_rfc3339()])?;
        Ok(())
    }

    fn last_crawled(&self, url: &str) -> StorageResult<Option<DateTime<Utc>>> {
        let hash_url = url_hash(url);
        let age: Option<String> = self
            .conn
            .query_row(
                "SELECT age FROM track_ages WHERE hash_url = ?1",
                params![hash_url],
                |row| row.get(0),
            )
            .optional()?;

        age.map(|value| {
            DateTime::parse_from_rfc3339(&value)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|_| StorageError::Timestamp { hash_url, value })
        })
        .transpose()
    }

    fn count_records(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM track_ages", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

//! Database schema definitions
//!
//! This module contains the SQL schema for the crawl-record database.

use rusqlite::Connection;

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Last crawl time per URL, keyed by SHA-256 hex digest of the URL
CREATE TABLE IF NOT EXISTS track_ages (
    hash_url TEXT PRIMARY KEY,
    age TEXT NOT NULL
);
"#;

/// Upsert statement for a crawl record
pub const UPSERT_AGE_SQL: &str = "INSERT INTO track_ages (hash_url, age) VALUES (?1, ?2)
     ON CONFLICT (hash_url) DO UPDATE SET age = excluded.age";

/// Initializes the database schema
///
/// Creates the tables if they don't already exist.
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

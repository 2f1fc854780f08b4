//! Storage layer for the workweek tracker.
//!
//! Provides a string key-value store backed by `rusqlite`, implementing
//! [`wt_core::KeyValueStore`].
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! The tracker drives its stores from a single thread, so the connection is
//! shared through `Rc<dyn KeyValueStore>` rather than a pool.
//!
//! # Schema
//!
//! A single `kv` table maps keys to TEXT values. The core stores the week as a
//! JSON array under `week` and the workday length as a decimal string under
//! `preferredWorkdayHours`; this crate does not interpret either.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use wt_core::{KeyValueStore, StorageError};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Returns the value stored under `key`.
    pub fn get_value(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    /// Inserts or replaces the value under `key`.
    pub fn set_value(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.conn.execute(
            "
            INSERT INTO kv (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
            params![key, value],
        )?;
        tracing::debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    /// Deletes `key`, returning whether it existed.
    pub fn remove_value(&self, key: &str) -> Result<bool, DbError> {
        let removed = self.conn.execute("DELETE FROM kv WHERE key = ?", [key])?;
        tracing::debug!(key, removed, "removed value");
        Ok(removed > 0)
    }
}

fn read_error(key: &str, e: DbError) -> StorageError {
    StorageError::Read {
        key: key.to_string(),
        source: Box::new(e),
    }
}

fn write_error(key: &str, e: DbError) -> StorageError {
    StorageError::Write {
        key: key.to_string(),
        source: Box::new(e),
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.get_value(key).map_err(|e| read_error(key, e))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_value(key, value).map_err(|e| write_error(key, e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.remove_value(key)
            .map(|_| ())
            .map_err(|e| write_error(key, e))
    }
}

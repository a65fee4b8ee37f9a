//! Test utilities for database setup.
//!
//! Provides helpers that reuse the authoritative schema initialization,
//! eliminating schema duplication in test code.

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::db::{self, DbPool};

/// Test environment with a migrated study database in a temporary directory.
///
/// The directory (and database file) is removed when dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    /// study.db connection with the full schema
    pub conn: Connection,
}

impl TestEnv {
    /// Create a test environment using `db::run_migrations()`.
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let conn = Connection::open(temp.path().join("study.db"))?;
        db::run_migrations(&conn)?;

        Ok(Self { temp, conn })
    }

    /// Get the temporary directory path for creating test files.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Consume the environment into a pool for handler tests.
    ///
    /// The returned `TempDir` must outlive the pool.
    pub fn into_pool(self) -> (TempDir, DbPool) {
        (self.temp, Arc::new(Mutex::new(self.conn)))
    }
}

pub mod results;
pub mod schema;
pub mod users;
pub mod vr_nugget;

use rusqlite::{ffi, Connection, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

// Re-export all public items from submodules
pub use results::*;
pub use schema::run_migrations;
pub use users::*;
pub use vr_nugget::*;

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }
}

/// Error returned when database lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Database unavailable")
  }
}

impl std::error::Error for DbLockError {}

/// Failure to store a study result
#[derive(Debug, Error)]
pub enum PersistError {
  /// The participant already has a row; the first result stays untouched
  #[error("a result for user {user_id} already exists")]
  DuplicateSubmission { user_id: i64 },

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error(transparent)]
  Unavailable(#[from] DbLockError),
}

impl PersistError {
  /// Map a primary-key/unique violation on `user_id` to `DuplicateSubmission`
  pub fn from_insert(e: rusqlite::Error, user_id: i64) -> Self {
    if is_duplicate_key(&e) {
      PersistError::DuplicateSubmission { user_id }
    } else {
      PersistError::Database(e)
    }
  }
}

// Only key collisions; NOT NULL, CHECK and foreign-key failures stay database errors
fn is_duplicate_key(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if err.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        || err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    DbLockError
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).log_warn("Could not create database directory");
  }

  // Create backup before migrations if database exists
  if path.exists() {
    std::fs::copy(path, path.with_extension("db.backup"))
      .log_warn("Could not create database backup");
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

/// Lightweight connectivity check
pub fn ping(conn: &Connection) -> Result<()> {
  conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
  Ok(())
}

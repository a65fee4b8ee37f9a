//! Default file locations - single source of truth for on-disk paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! Explicit overrides for individual files live in config.rs.

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
  DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// SQLite database holding users and study results
pub fn db_path() -> String {
  format!("{}/study.db", data_dir())
}

/// Knowledge test definition (card pool + correct answer)
pub fn knowledge_test_config_path() -> String {
  format!("{}/knowledge-test-config.json", data_dir())
}

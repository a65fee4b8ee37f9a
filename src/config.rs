//! Application configuration.
//!
//! Values are resolved once at startup with priority
//! `config.toml` > environment (`.env` is loaded first) > defaults.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [database]
//! path = "data/study.db"
//!
//! [knowledge_test]
//! path = "data/knowledge-test-config.json"
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use crate::paths;

/// Default server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const SERVER_PORT: u16 = 3000;

/// Configuration file name, relative to the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
  server: Option<ServerConfig>,
  database: Option<PathConfig>,
  knowledge_test: Option<PathConfig>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
  host: Option<String>,
  port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct PathConfig {
  path: Option<String>,
}

impl FileConfig {
  /// Read config.toml if present; a malformed file is logged and ignored
  pub fn read(path: &str) -> Option<Self> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<FileConfig>(&contents) {
      Ok(config) => Some(config),
      Err(e) => {
        tracing::warn!("Ignoring malformed {}: {}", path, e);
        None
      }
    }
  }
}

/// Resolved process settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
  pub host: String,
  pub port: u16,
  pub database_path: PathBuf,
  pub knowledge_test_path: PathBuf,
}

impl Settings {
  /// Load settings from config.toml, .env and the process environment
  pub fn load() -> Self {
    let _ = dotenvy::dotenv();
    let file = FileConfig::read(CONFIG_FILE);
    Self::resolve(file, |key| std::env::var(key).ok())
  }

  /// Resolve settings from an optional config file and an env lookup
  pub fn resolve(file: Option<FileConfig>, env: impl Fn(&str) -> Option<String>) -> Self {
    let file = file.unwrap_or_default();
    let server = file.server.as_ref();

    let host = server
      .and_then(|s| s.host.clone())
      .or_else(|| env("HOST"))
      .unwrap_or_else(|| SERVER_ADDR.to_string());

    let port = server
      .and_then(|s| s.port)
      .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
      .unwrap_or(SERVER_PORT);

    let database_path = resolve_path(
      "database",
      file.database.and_then(|d| d.path),
      env("DATABASE_PATH"),
      paths::db_path(),
    );

    let knowledge_test_path = resolve_path(
      "knowledge test config",
      file.knowledge_test.and_then(|k| k.path),
      env("KNOWLEDGE_TEST_CONFIG"),
      paths::knowledge_test_config_path(),
    );

    Self {
      host,
      port,
      database_path,
      knowledge_test_path,
    }
  }

  /// Get the full server bind address
  pub fn bind_addr(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

fn resolve_path(
  what: &str,
  from_file: Option<String>,
  from_env: Option<String>,
  default: String,
) -> PathBuf {
  if let Some(path) = from_file {
    tracing::info!("Using {} from {}: {}", what, CONFIG_FILE, path);
    return PathBuf::from(path);
  }
  if let Some(path) = from_env {
    tracing::info!("Using {} from environment: {}", what, path);
    return PathBuf::from(path);
  }
  tracing::info!("Using default {} path: {}", what, default);
  PathBuf::from(default)
}

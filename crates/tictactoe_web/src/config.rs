//! Server configuration.

use crate::leaderboard::{InMemoryStore, JsonFileStore, LeaderboardStore, StoreError};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Where the leaderboard lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Pretty-printed JSON document at `leaderboard_path`.
    #[default]
    Json,
    /// Process memory; lost on exit.
    Memory,
    /// SQLite database at `leaderboard_path`. Needs the `sqlite` feature.
    Sqlite,
}

/// Configuration for the HTTP server.
///
/// Every field has a default, so a TOML file only needs the keys it
/// changes. CLI flags override file values through the `with_*` setters.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    #[setters(into)]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Leaderboard backend.
    #[serde(default)]
    store: StoreKind,

    /// Leaderboard file or database path.
    #[serde(default = "default_leaderboard_path")]
    #[setters(into)]
    leaderboard_path: PathBuf,

    /// Seconds a game session may sit untouched before it is dropped.
    #[serde(default = "default_session_idle_secs")]
    session_idle_secs: u64,
}

#[instrument]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[instrument]
fn default_port() -> u16 {
    3000
}

#[instrument]
fn default_leaderboard_path() -> PathBuf {
    PathBuf::from("leaderboard.json")
}

#[instrument]
fn default_session_idle_secs() -> u64 {
    60 * 60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store: StoreKind::default(),
            leaderboard_path: default_leaderboard_path(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, store = ?config.store, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Idle lifetime of a game session.
    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Opens the configured leaderboard backend.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be opened, or if
    /// `sqlite` is selected in a build without that feature.
    #[instrument(skip(self), fields(store = ?self.store, path = %self.leaderboard_path.display()))]
    pub fn open_store(&self) -> Result<Arc<dyn LeaderboardStore>, StoreError> {
        let store: Arc<dyn LeaderboardStore> = match self.store {
            StoreKind::Json => Arc::new(JsonFileStore::new(&self.leaderboard_path)),
            StoreKind::Memory => Arc::new(InMemoryStore::new()),
            #[cfg(feature = "sqlite")]
            StoreKind::Sqlite => Arc::new(crate::leaderboard::SqliteStore::open(
                self.leaderboard_path.to_string_lossy(),
            )?),
            #[cfg(not(feature = "sqlite"))]
            StoreKind::Sqlite => {
                return Err(StoreError::new(
                    "this build does not include the sqlite feature",
                ));
            }
        };
        info!("Leaderboard store opened");
        Ok(store)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(*config.store(), StoreKind::Json);
        assert_eq!(config.leaderboard_path(), &PathBuf::from("leaderboard.json"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "port = 8080\nstore = \"memory\"").expect("write");

        let config = ServerConfig::from_file(file.path()).expect("parse");
        assert_eq!(*config.port(), 8080);
        assert_eq!(*config.store(), StoreKind::Memory);
        assert_eq!(config.host(), "127.0.0.1");
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "port = \"not a number\"").expect("write");
        let err = ServerConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_setters_override() {
        let config = ServerConfig::default()
            .with_host("0.0.0.0")
            .with_port(9000)
            .with_store(StoreKind::Memory);
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert!(config.open_store().is_ok());
    }

    #[test]
    fn test_session_idle_ttl_from_file() {
        assert_eq!(ServerConfig::default().session_idle_ttl(), Duration::from_secs(3600));

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "session_idle_secs = 90").expect("write");
        let config = ServerConfig::load(Some(file.path())).expect("parse");
        assert_eq!(config.session_idle_ttl(), Duration::from_secs(90));
    }

    #[test]
    fn test_load_without_path_is_default() {
        assert_eq!(ServerConfig::load(None).expect("defaults"), ServerConfig::default());
    }

    #[test]
    fn test_configured_json_store_reads_existing_board() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let board_path = dir.path().join("scores.json");
        let seeded = JsonFileStore::new(&board_path);
        let mut board = crate::leaderboard::Leaderboard::new();
        board.insert(crate::leaderboard::LeaderboardEntry::with_totals("Ann", 3, 1, 0));
        seeded.save(&board).expect("seed");

        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!("store = \"json\"\nleaderboard_path = {:?}\n", board_path.display().to_string()),
        )
        .expect("write config");

        let config = ServerConfig::load(Some(config_path.as_path())).expect("parse");
        let store = config.open_store().expect("open");
        let loaded = store.load_strict().expect("readable");
        assert_eq!(*loaded.get("Ann").expect("seeded").wins(), 3);
    }

    #[test]
    fn test_configured_memory_store_ignores_path() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let board_path = dir.path().join("scores.json");
        std::fs::write(&board_path, "{ not json").expect("write");

        let config = ServerConfig::default()
            .with_store(StoreKind::Memory)
            .with_leaderboard_path(&board_path);
        let store = config.open_store().expect("open");
        assert!(store.load_strict().expect("memory").is_empty());
    }

    #[cfg(not(feature = "sqlite"))]
    #[test]
    fn test_sqlite_needs_feature() {
        let config = ServerConfig::default().with_store(StoreKind::Sqlite);
        assert!(config.open_store().is_err());
    }
}

//! Leaderboard persistence errors.

use derive_more::{Display, Error};
use tracing::instrument;

/// The durable leaderboard could not be read or written.
///
/// Gameplay never fails on this error: [`record_result`] logs it and keeps
/// going. It reaches callers only through explicit `load_strict`/`save`.
///
/// [`record_result`]: crate::LeaderboardStore::record_result
#[derive(Debug, Clone, Display, Error)]
#[display("Leaderboard persistence unavailable: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Malformed leaderboard document: {}", err))
    }
}

#[cfg(feature = "sqlite")]
impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Diesel error: {}", err))
    }
}

#[cfg(feature = "sqlite")]
impl From<diesel::ConnectionError> for StoreError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection error: {}", err))
    }
}

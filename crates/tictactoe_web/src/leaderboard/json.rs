//! Leaderboard persisted as a pretty-printed JSON document.

use super::{Leaderboard, LeaderboardStore, StoreError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

/// Leaderboard stored in a single JSON file.
///
/// The document is an object keyed by player name. Each write goes to its
/// own uniquely named temp file in the same directory and is renamed into
/// place, so readers never see a half-written document and concurrent
/// writers never share a temp file. The last rename wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl LeaderboardStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_strict(&self) -> Result<Leaderboard, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No leaderboard file yet");
                return Ok(Leaderboard::new());
            }
            Err(e) => return Err(e.into()),
        };
        let leaderboard: Leaderboard = serde_json::from_str(&text)?;
        debug!(players = leaderboard.len(), "Leaderboard loaded");
        Ok(leaderboard)
    }

    #[instrument(skip(self, leaderboard), fields(path = %self.path.display(), players = leaderboard.len()))]
    fn save(&self, leaderboard: &Leaderboard) -> Result<(), StoreError> {
        let directory = self.directory();
        fs::create_dir_all(directory)?;
        let document = serde_json::to_string_pretty(leaderboard)?;

        let mut temp = NamedTempFile::new_in(directory)?;
        temp.write_all(document.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        debug!("Leaderboard written");
        Ok(())
    }
}

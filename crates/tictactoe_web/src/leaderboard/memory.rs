//! Process-local leaderboard for tests and throwaway servers.

use super::{Leaderboard, LeaderboardStore, StoreError};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, instrument};

/// Leaderboard held in memory. Clones share the same mapping.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    leaderboard: Arc<Mutex<Leaderboard>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `leaderboard`.
    pub fn with_leaderboard(leaderboard: Leaderboard) -> Self {
        Self {
            leaderboard: Arc::new(Mutex::new(leaderboard)),
        }
    }
}

impl LeaderboardStore for InMemoryStore {
    fn load_strict(&self) -> Result<Leaderboard, StoreError> {
        let guard = self.leaderboard.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    #[instrument(skip(self, leaderboard), fields(players = leaderboard.len()))]
    fn save(&self, leaderboard: &Leaderboard) -> Result<(), StoreError> {
        let mut guard = self.leaderboard.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = leaderboard.clone();
        debug!("Leaderboard stored in memory");
        Ok(())
    }
}

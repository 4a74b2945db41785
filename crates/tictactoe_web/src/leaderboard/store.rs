//! The persistence seam for the leaderboard.

use super::{Leaderboard, LeaderboardEntry, StoreError};
use tictactoe_engine::MatchResult;
use tracing::{info, instrument, warn};

/// Durable mapping from player name to lifetime totals.
///
/// Implementors supply [`load_strict`](Self::load_strict) and
/// [`save`](Self::save). The provided methods never fail: a store that
/// cannot be read behaves as empty, and a failed write is logged and
/// dropped so gameplay carries on.
pub trait LeaderboardStore: Send + Sync + std::fmt::Debug {
    /// Reads the stored mapping. A store that was never written is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium is unreadable or holds
    /// malformed data.
    fn load_strict(&self) -> Result<Leaderboard, StoreError>;

    /// Replaces the stored mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    fn save(&self, leaderboard: &Leaderboard) -> Result<(), StoreError>;

    /// Reads the stored mapping, falling back to empty on any error.
    #[instrument(skip(self))]
    fn load(&self) -> Leaderboard {
        match self.load_strict() {
            Ok(leaderboard) => leaderboard,
            Err(e) => {
                warn!(error = %e, "Leaderboard unreadable, starting empty");
                Leaderboard::new()
            }
        }
    }

    /// Applies one finished game and writes the result back.
    ///
    /// Returns the updated mapping even if the write failed.
    #[instrument(skip(self))]
    fn record_result(&self, result: &MatchResult) -> Leaderboard {
        let mut leaderboard = self.load();
        leaderboard.apply(result);
        match self.save(&leaderboard) {
            Ok(()) => info!(players = leaderboard.len(), "Leaderboard updated"),
            Err(e) => warn!(error = %e, "Leaderboard write failed, result kept in memory only"),
        }
        leaderboard
    }

    /// Current records, ranked.
    fn standings(&self) -> Vec<LeaderboardEntry> {
        self.load().standings().into_iter().cloned().collect()
    }
}

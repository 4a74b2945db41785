//! Per-player records and the leaderboard mapping.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tictactoe_engine::{MatchResult, PlayerName};
use tracing::{debug, instrument};

/// Lifetime totals for one player name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct LeaderboardEntry {
    /// Player name, same as the mapping key.
    player_name: String,
    /// Games won.
    wins: u32,
    /// Games lost.
    losses: u32,
    /// Games drawn.
    draws: u32,
    /// Games finished, `wins + losses + draws` saturated at `u32::MAX`.
    total_matches: u32,
}

impl LeaderboardEntry {
    /// Creates an empty record for `player_name`.
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            wins: 0,
            losses: 0,
            draws: 0,
            total_matches: 0,
        }
    }

    /// Creates a record with existing totals. `total_matches` is derived.
    pub fn with_totals(player_name: impl Into<String>, wins: u32, losses: u32, draws: u32) -> Self {
        Self {
            player_name: player_name.into(),
            wins,
            losses,
            draws,
            total_matches: wins.saturating_add(losses).saturating_add(draws),
        }
    }

    /// Share of finished games won, 0.0 with no games.
    pub fn win_rate(&self) -> f64 {
        if self.total_matches == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.total_matches)
        }
    }

    fn record_win(&mut self) {
        self.wins = self.wins.saturating_add(1);
        self.total_matches = self.total_matches.saturating_add(1);
    }

    fn record_loss(&mut self) {
        self.losses = self.losses.saturating_add(1);
        self.total_matches = self.total_matches.saturating_add(1);
    }

    fn record_draw(&mut self) {
        self.draws = self.draws.saturating_add(1);
        self.total_matches = self.total_matches.saturating_add(1);
    }
}

impl Default for LeaderboardEntry {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Every player ever recorded, keyed by name.
///
/// Serializes as a plain JSON object of name to entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: BTreeMap<String, LeaderboardEntry>,
}

impl Leaderboard {
    /// Creates an empty leaderboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a player's record.
    pub fn get(&self, player_name: &str) -> Option<&LeaderboardEntry> {
        self.entries.get(player_name)
    }

    /// Number of recorded players.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no player has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records, in name order.
    pub fn entries(&self) -> impl Iterator<Item = &LeaderboardEntry> {
        self.entries.values()
    }

    /// Inserts or replaces a record under its own name.
    pub fn insert(&mut self, entry: LeaderboardEntry) {
        self.entries.insert(entry.player_name.clone(), entry);
    }

    fn entry_mut(&mut self, name: &PlayerName) -> &mut LeaderboardEntry {
        self.entries
            .entry(name.as_str().to_string())
            .or_insert_with(|| {
                debug!(player = %name, "Creating leaderboard entry");
                LeaderboardEntry::new(name.as_str())
            })
    }

    /// Folds one finished game into the totals, creating records on first
    /// appearance.
    #[instrument(skip(self))]
    pub fn apply(&mut self, result: &MatchResult) {
        match result {
            MatchResult::Decisive { winner, loser } => {
                self.entry_mut(winner).record_win();
                self.entry_mut(loser).record_loss();
            }
            MatchResult::Draw { first, second } => {
                self.entry_mut(first).record_draw();
                self.entry_mut(second).record_draw();
            }
        }
    }

    /// Records ranked by wins (desc), then losses (asc), then name.
    pub fn standings(&self) -> Vec<&LeaderboardEntry> {
        let mut ranked: Vec<&LeaderboardEntry> = self.entries.values().collect();
        ranked.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then(a.losses.cmp(&b.losses))
                .then_with(|| a.player_name.cmp(&b.player_name))
        });
        ranked
    }

    /// Renders the standings as a fixed-width text table.
    pub fn render_table(&self) -> String {
        let mut out = format!(
            "{:<4} {:<24} {:>5} {:>6} {:>5} {:>7} {:>6}\n",
            "#", "Player", "Wins", "Losses", "Draws", "Matches", "Win %"
        );
        for (rank, entry) in self.standings().into_iter().enumerate() {
            out.push_str(&format!(
                "{:<4} {:<24} {:>5} {:>6} {:>5} {:>7} {:>5.1}%\n",
                rank + 1,
                entry.player_name,
                entry.wins,
                entry.losses,
                entry.draws,
                entry.total_matches,
                entry.win_rate() * 100.0
            ));
        }
        out
    }
}

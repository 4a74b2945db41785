//! Move records kept in a game's history.

use crate::{Mark, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One applied move: who played, with which mark, where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MoveRecord {
    /// Name of the player who moved.
    player_name: String,
    /// The mark placed.
    mark: Mark,
    /// Where it was placed.
    position: Position,
}

impl MoveRecord {
    /// Creates a new move record.
    pub fn new(player_name: impl Into<String>, mark: Mark, position: Position) -> Self {
        Self {
            player_name: player_name.into(),
            mark,
            position,
        }
    }
}

/// Cells are shown 1-based to players.
impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) played at cell {}",
            self.player_name,
            self.mark,
            self.position.to_index() + 1
        )
    }
}

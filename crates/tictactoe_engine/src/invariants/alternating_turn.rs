//! Alternating turn invariant: marks alternate X, O, X, O, ...

use super::Invariant;
use crate::{Game, Mark};

/// Invariant: history starts with X and alternates. While the game is in
/// progress the mark to move follows the last move; once it is over the
/// mark to move is the one that ended it.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        let history = game.history();

        let Some(last) = history.last() else {
            return game.current_player() == Mark::X;
        };

        if *history[0].mark() != Mark::X {
            return false;
        }

        if history.windows(2).any(|w| w[0].mark() == w[1].mark()) {
            return false;
        }

        let expected = if game.status().is_over() {
            *last.mark()
        } else {
            last.mark().opponent()
        };
        game.current_player() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

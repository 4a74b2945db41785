//! Monotonic board invariant: squares never change once set.

use super::Invariant;
use crate::{Board, Game, Square};

/// Invariant: replaying the history onto an empty board, never overwriting a
/// square, reproduces the current board.
pub struct MonotonicBoardInvariant;

impl Invariant<Game> for MonotonicBoardInvariant {
    fn holds(game: &Game) -> bool {
        let mut reconstructed = Board::new();

        for record in game.history() {
            let pos = *record.position();
            if !reconstructed.is_empty(pos) {
                return false;
            }
            reconstructed.set(pos, Square::Occupied(*record.mark()));
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}

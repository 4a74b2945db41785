//! Single-board game engine for tic-tac-toe.
//!
//! [`Game::place`] is the only path that changes the board, the player to
//! move, the status, or the history. It validates everything before touching
//! state, so a rejected move leaves the game untouched.

use crate::invariants::{InvariantSet, TicTacToeInvariants};
use crate::rules::{check_winner, is_full};
use crate::{Board, GameError, Mark, MoveRecord, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended with three in a row.
    Won(Mark),
    /// Board filled with no winner.
    Drawn,
}

impl GameStatus {
    /// True once the game has reached a terminal status.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Result of placing a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Game continues; the given mark moves next.
    Continue(Mark),
    /// This move completed a line.
    Won(Mark),
    /// This move filled the board without a winner.
    Drawn,
}

/// Board, turn, status, and history of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) current_player: Mark,
    pub(crate) status: GameStatus,
    pub(crate) history: Vec<MoveRecord>,
}

impl Game {
    /// Creates a new game: empty board, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Mark::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move. After a terminal move this is the mark
    /// that made it.
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self.status {
            GameStatus::Won(mark) => Some(mark),
            _ => None,
        }
    }

    /// Returns the move history, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Places the current player's mark at `cell_index` for `player_name`.
    ///
    /// Win is evaluated before draw, since the last cell can complete a line.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameAlreadyOver`] if the status is terminal.
    /// - [`GameError::InvalidCellIndex`] if `cell_index` is outside 0-8.
    /// - [`GameError::CellOccupied`] if the cell already holds a mark.
    #[instrument(skip(self, player_name), fields(player = ?self.current_player))]
    pub fn place(&mut self, cell_index: usize, player_name: &str) -> Result<Transition, GameError> {
        if self.status.is_over() {
            warn!(status = ?self.status, "Move attempted after game over");
            return Err(GameError::GameAlreadyOver);
        }

        let pos = Position::from_index(cell_index).ok_or_else(|| {
            warn!("Cell index out of range");
            GameError::InvalidCellIndex(cell_index)
        })?;

        if !self.board.is_empty(pos) {
            warn!(position = %pos, "Cell already taken");
            return Err(GameError::CellOccupied(pos));
        }

        let mark = self.current_player;
        self.board.set(pos, Square::Occupied(mark));
        self.history.push(MoveRecord::new(player_name, mark, pos));
        debug!(position = %pos, ?mark, moves = self.history.len(), "Mark placed");

        let transition = if let Some(winner) = check_winner(&self.board) {
            self.status = GameStatus::Won(winner);
            info!(?winner, "Game won");
            Transition::Won(winner)
        } else if is_full(&self.board) {
            self.status = GameStatus::Drawn;
            info!("Game drawn");
            Transition::Drawn
        } else {
            self.current_player = mark.opponent();
            Transition::Continue(self.current_player)
        };

        debug_assert!(
            TicTacToeInvariants::check_all(self).is_ok(),
            "Game invariants violated after move"
        );
        Ok(transition)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

//! Errors raised by the game engine.
//!
//! Every variant is a local validation failure: the engine checks before it
//! mutates, so a rejected call leaves the session exactly as it was.

use crate::Position;

/// Longest accepted player name, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 50;

/// Why a pair of player names was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlayerNameError {
    /// A name was empty after trimming.
    #[display("Both player names are required")]
    Empty,

    /// A name was longer than [`MAX_NAME_LEN`] characters.
    #[display("Player names cannot exceed {} characters", MAX_NAME_LEN)]
    TooLong,

    /// Both players used the same name.
    #[display("Player names must be different")]
    Duplicate,
}

impl std::error::Error for PlayerNameError {}

/// Error that can occur when starting a session or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum GameError {
    /// Player names failed validation.
    #[display("Invalid player name: {}", _0)]
    #[from]
    InvalidPlayerName(PlayerNameError),

    /// A move was attempted after the game finished.
    #[display("Game is already over. Reset the board or start a new game")]
    GameAlreadyOver,

    /// The cell index is outside 0-8.
    #[display("Invalid cell index {}: must be between 0 and 8", _0)]
    InvalidCellIndex(usize),

    /// The target cell already holds a mark.
    #[display("Cell {} is already taken", _0)]
    CellOccupied(Position),
}

impl std::error::Error for GameError {}

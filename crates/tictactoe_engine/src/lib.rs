//! Tic-tac-toe engine: board, turn order, terminal detection, and per-pairing
//! tallies.
//!
//! The engine is pure and deterministic. It performs no I/O; callers decide
//! where a [`GameSession`] is stored and what to do with a finished game's
//! [`MatchResult`].
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameSession, GameStatus, Mark, MoveOutcome};
//!
//! # fn example() -> Result<(), tictactoe_engine::GameError> {
//! let mut session = GameSession::new("Ann", "Bob")?;
//! for cell in [0, 3, 1, 4] {
//!     session.apply_move(cell)?;
//! }
//! let outcome = session.apply_move(2)?;
//! assert!(matches!(outcome, MoveOutcome::Finished(_)));
//! assert_eq!(session.game().status(), GameStatus::Won(Mark::X));
//! assert_eq!(*session.counters().x_wins(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod error;
mod game;
pub mod invariants;
mod player;
mod position;
pub mod rules;
mod session;
mod types;

pub use action::MoveRecord;
pub use error::{GameError, MAX_NAME_LEN, PlayerNameError};
pub use game::{Game, GameStatus, Transition};
pub use player::{Pairing, PlayerName};
pub use position::Position;
pub use session::{GameSession, MatchResult, MoveOutcome, SessionCounters};
pub use types::{Board, Mark, Square};

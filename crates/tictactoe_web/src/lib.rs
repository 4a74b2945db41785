//! Tic-tac-toe web service
//!
//! Serves the `tictactoe_engine` rules over a JSON API and keeps a durable
//! leaderboard of every finished game.
//!
//! # Architecture
//!
//! - **Server**: axum routes that validate input and drive game sessions
//! - **Sessions**: in-process registry of live games, keyed by uuid
//! - **Leaderboard**: lifetime records behind the [`LeaderboardStore`] trait
//! - **Terminal**: two players on one console, sharing the same leaderboard
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictactoe_web::{AppState, JsonFileStore, SessionManager, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let state = AppState::new(
//!     SessionManager::new(),
//!     Arc::new(JsonFileStore::new("leaderboard.json")),
//! );
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, router(state)).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod leaderboard;
mod server;
mod sessions;
mod terminal;
mod views;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig, StoreKind};

// Crate-level exports - Leaderboard persistence
#[cfg(feature = "sqlite")]
pub use leaderboard::SqliteStore;
pub use leaderboard::{
    InMemoryStore, JsonFileStore, Leaderboard, LeaderboardEntry, LeaderboardStore, StoreError,
};

// Crate-level exports - HTTP server
pub use server::{ApiError, AppState, router};
pub use views::{
    ErrorResponse, GameResponse, GameView, LeaderboardResponse, MoveRequest, PlayersView,
    SessionStatsView, StartGameRequest,
};

// Crate-level exports - Session management
pub use sessions::{SessionId, SessionManager};

// Crate-level exports - Terminal play
pub use terminal::play;

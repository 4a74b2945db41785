//! Lifetime win/loss/draw records, keyed by player name.

mod error;
mod json;
mod memory;
mod models;
#[cfg(feature = "sqlite")]
mod schema; // Diesel generated schema - internal use only
#[cfg(feature = "sqlite")]
mod sqlite;
mod store;

pub use error::StoreError;
pub use json::JsonFileStore;
pub use memory::InMemoryStore;
pub use models::{Leaderboard, LeaderboardEntry};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
pub use store::LeaderboardStore;

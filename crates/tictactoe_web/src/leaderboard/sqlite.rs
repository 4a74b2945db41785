//! Leaderboard stored in a SQLite table through diesel.

use chrono::{NaiveDateTime, Utc};
use derive_new::new;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tictactoe_engine::{MatchResult, PlayerName};
use tracing::{debug, info, instrument, warn};

use super::{Leaderboard, LeaderboardEntry, LeaderboardStore, StoreError, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Leaderboard row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schema::leaderboard)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct EntryRow {
    player_name: String,
    wins: i32,
    losses: i32,
    draws: i32,
    total_matches: i32,
    updated_at: NaiveDateTime,
}

impl From<EntryRow> for LeaderboardEntry {
    fn from(row: EntryRow) -> Self {
        debug_assert_eq!(row.total_matches, row.wins + row.losses + row.draws);
        let count = |n: i32| u32::try_from(n).unwrap_or_default();
        LeaderboardEntry::with_totals(
            row.player_name,
            count(row.wins),
            count(row.losses),
            count(row.draws),
        )
    }
}

/// Insertable leaderboard row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::leaderboard)]
struct NewEntryRow {
    player_name: String,
    wins: i32,
    losses: i32,
    draws: i32,
    total_matches: i32,
    updated_at: NaiveDateTime,
}

impl NewEntryRow {
    fn from_entry(entry: &LeaderboardEntry, now: NaiveDateTime) -> Self {
        let count = |n: u32| i32::try_from(n).unwrap_or(i32::MAX);
        Self::new(
            entry.player_name().clone(),
            count(*entry.wins()),
            count(*entry.losses()),
            count(*entry.draws()),
            count(*entry.total_matches()),
            now,
        )
    }
}

/// Leaderboard in a SQLite database, one row per player.
///
/// Each call opens its own connection. [`record_result`] updates just the two
/// affected rows inside one transaction.
///
/// [`record_result`]: LeaderboardStore::record_result
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at `db_path` and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path))]
    pub fn open(db_path: impl Into<String>) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.into(),
        };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migrations failed: {}", e)))?;
        info!(path = %store.db_path, migrations = applied.len(), "SqliteStore ready");
        Ok(store)
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    fn bump(
        conn: &mut SqliteConnection,
        name: &PlayerName,
        column: Column,
        now: NaiveDateTime,
    ) -> QueryResult<()> {
        use schema::leaderboard::dsl;

        diesel::insert_or_ignore_into(dsl::leaderboard)
            .values(&NewEntryRow::new(name.as_str().to_string(), 0, 0, 0, 0, now))
            .execute(conn)?;

        let row = dsl::leaderboard.find(name.as_str());
        match column {
            Column::Wins => diesel::update(row)
                .set((
                    dsl::wins.eq(dsl::wins + 1),
                    dsl::total_matches.eq(dsl::total_matches + 1),
                    dsl::updated_at.eq(now),
                ))
                .execute(conn)?,
            Column::Losses => diesel::update(row)
                .set((
                    dsl::losses.eq(dsl::losses + 1),
                    dsl::total_matches.eq(dsl::total_matches + 1),
                    dsl::updated_at.eq(now),
                ))
                .execute(conn)?,
            Column::Draws => diesel::update(row)
                .set((
                    dsl::draws.eq(dsl::draws + 1),
                    dsl::total_matches.eq(dsl::total_matches + 1),
                    dsl::updated_at.eq(now),
                ))
                .execute(conn)?,
        };
        Ok(())
    }

    fn try_record(&self, result: &MatchResult) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let now = Utc::now().naive_utc();
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            match result {
                MatchResult::Decisive { winner, loser } => {
                    Self::bump(conn, winner, Column::Wins, now)?;
                    Self::bump(conn, loser, Column::Losses, now)?;
                }
                MatchResult::Draw { first, second } => {
                    Self::bump(conn, first, Column::Draws, now)?;
                    Self::bump(conn, second, Column::Draws, now)?;
                }
            }
            Ok(())
        })?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Column {
    Wins,
    Losses,
    Draws,
}

impl LeaderboardStore for SqliteStore {
    #[instrument(skip(self))]
    fn load_strict(&self) -> Result<Leaderboard, StoreError> {
        let mut conn = self.connection()?;
        let rows = schema::leaderboard::table
            .select(EntryRow::as_select())
            .load(&mut conn)?;
        let last_update = rows.iter().map(|row| row.updated_at).max();
        let mut leaderboard = Leaderboard::new();
        for row in rows {
            leaderboard.insert(row.into());
        }
        debug!(players = leaderboard.len(), ?last_update, "Leaderboard loaded");
        Ok(leaderboard)
    }

    #[instrument(skip(self, leaderboard), fields(players = leaderboard.len()))]
    fn save(&self, leaderboard: &Leaderboard) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let now = Utc::now().naive_utc();
        let rows: Vec<NewEntryRow> = leaderboard
            .entries()
            .map(|entry| NewEntryRow::from_entry(entry, now))
            .collect();
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(schema::leaderboard::table).execute(conn)?;
            if !rows.is_empty() {
                diesel::insert_into(schema::leaderboard::table)
                    .values(&rows)
                    .execute(conn)?;
            }
            Ok(())
        })?;
        debug!("Leaderboard replaced");
        Ok(())
    }

    #[instrument(skip(self))]
    fn record_result(&self, result: &MatchResult) -> Leaderboard {
        if let Err(e) = self.try_record(result) {
            warn!(error = %e, "Leaderboard write failed");
            let mut leaderboard = self.load();
            leaderboard.apply(result);
            return leaderboard;
        }
        info!("Leaderboard updated");
        self.load()
    }
}

//! Tests for the SQLite leaderboard.

#![cfg(feature = "sqlite")]

use tempfile::NamedTempFile;
use tictactoe_engine::{MatchResult, PlayerName};
use tictactoe_web::{Leaderboard, LeaderboardEntry, LeaderboardStore, SqliteStore};

fn setup_test_db() -> (NamedTempFile, SqliteStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteStore::open(db_path).expect("Failed to open store");
    (db_file, store)
}

fn name(raw: &str) -> PlayerName {
    PlayerName::parse(raw).expect("valid name")
}

#[test]
fn test_fresh_database_is_empty() {
    let (_db, store) = setup_test_db();
    assert!(store.load_strict().expect("Query failed").is_empty());
}

#[test]
fn test_record_result_increments_both_players() {
    let (_db, store) = setup_test_db();
    store.record_result(&MatchResult::Decisive {
        winner: name("Ann"),
        loser: name("Bob"),
    });
    let board = store.record_result(&MatchResult::Draw {
        first: name("Ann"),
        second: name("Bob"),
    });

    let ann = board.get("Ann").expect("recorded");
    assert_eq!((*ann.wins(), *ann.draws(), *ann.total_matches()), (1, 1, 2));
    let bob = board.get("Bob").expect("recorded");
    assert_eq!((*bob.losses(), *bob.draws(), *bob.total_matches()), (1, 1, 2));
}

#[test]
fn test_save_replaces_contents() {
    let (_db, store) = setup_test_db();
    store.record_result(&MatchResult::Decisive {
        winner: name("Ann"),
        loser: name("Bob"),
    });

    let mut replacement = Leaderboard::new();
    replacement.insert(LeaderboardEntry::with_totals("Cy", 2, 3, 4));
    store.save(&replacement).expect("Save failed");

    let board = store.load_strict().expect("Query failed");
    assert_eq!(board.len(), 1);
    assert_eq!(board.get("Cy"), replacement.get("Cy"));
}

#[test]
fn test_reopen_keeps_rows() {
    let (db, store) = setup_test_db();
    store.record_result(&MatchResult::Decisive {
        winner: name("Ann"),
        loser: name("Bob"),
    });
    let reopened = SqliteStore::open(db.path().to_str().expect("Invalid path")).expect("reopen");
    assert_eq!(reopened.standings()[0].player_name(), "Ann");
}

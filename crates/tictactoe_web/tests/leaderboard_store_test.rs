//! Tests for the JSON file leaderboard.

use std::fs;
use tempfile::TempDir;
use tictactoe_engine::{MatchResult, PlayerName};
use tictactoe_web::{JsonFileStore, Leaderboard, LeaderboardEntry, LeaderboardStore};

fn name(raw: &str) -> PlayerName {
    PlayerName::parse(raw).expect("valid name")
}

fn decisive(winner: &str, loser: &str) -> MatchResult {
    MatchResult::Decisive {
        winner: name(winner),
        loser: name(loser),
    }
}

fn setup() -> (TempDir, JsonFileStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonFileStore::new(dir.path().join("leaderboard.json"));
    (dir, store)
}

#[test]
fn test_missing_file_is_empty() {
    let (_dir, store) = setup();
    assert!(store.load_strict().expect("absent is not an error").is_empty());
    assert!(store.load().is_empty());
}

#[test]
fn test_corrupt_file_is_empty() {
    let (_dir, store) = setup();
    fs::write(store.path(), "{ this is not json").expect("write");
    assert!(store.load_strict().is_err());
    assert!(store.load().is_empty());
}

#[test]
fn test_results_survive_reopen() {
    let (dir, store) = setup();
    store.record_result(&decisive("Ann", "Bob"));
    store.record_result(&MatchResult::Draw {
        first: name("Ann"),
        second: name("Bob"),
    });

    let reopened = JsonFileStore::new(dir.path().join("leaderboard.json"));
    let board = reopened.load();
    let ann = board.get("Ann").expect("recorded");
    assert_eq!((*ann.wins(), *ann.losses(), *ann.draws()), (1, 0, 1));
    assert_eq!(*ann.total_matches(), 2);
    let bob = board.get("Bob").expect("recorded");
    assert_eq!((*bob.wins(), *bob.losses(), *bob.draws()), (0, 1, 1));
}

#[test]
fn test_reused_name_merges_into_existing_record() {
    let (_dir, store) = setup();
    store.record_result(&decisive("Ann", "Bob"));
    store.record_result(&decisive("Ann", "Cy"));
    let board = store.load();
    assert_eq!(board.len(), 3);
    assert_eq!(*board.get("Ann").expect("recorded").wins(), 2);
}

#[test]
fn test_document_is_name_keyed_pretty_json() {
    let (_dir, store) = setup();
    store.record_result(&decisive("Ann", "Bob"));
    let text = fs::read_to_string(store.path()).expect("read");
    assert!(text.contains('\n'), "pretty printed");

    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["Ann"]["player_name"], "Ann");
    assert_eq!(value["Ann"]["wins"], 1);
    assert_eq!(value["Bob"]["losses"], 1);
    assert_eq!(value["Bob"]["total_matches"], 1);
}

#[test]
fn test_reads_existing_document() {
    let (_dir, store) = setup();
    fs::write(
        store.path(),
        r#"{
    "Ann": {"player_name": "Ann", "wins": 4, "losses": 1, "draws": 2, "total_matches": 7}
}"#,
    )
    .expect("write");
    let board = store.record_result(&decisive("Ann", "Bob"));
    assert_eq!(*board.get("Ann").expect("recorded").wins(), 5);
    assert_eq!(*board.get("Ann").expect("recorded").total_matches(), 8);
}

#[test]
fn test_creates_missing_parent_directories() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonFileStore::new(dir.path().join("nested/deeper/leaderboard.json"));
    store.record_result(&decisive("Ann", "Bob"));
    assert_eq!(store.load().len(), 2);
}

#[test]
fn test_unwritable_store_still_returns_update() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "a file, not a directory").expect("write");
    let store = JsonFileStore::new(blocker.join("leaderboard.json"));

    assert!(store.save(&store.load()).is_err());
    let board = store.record_result(&decisive("Ann", "Bob"));
    assert_eq!(*board.get("Ann").expect("in memory").wins(), 1);
    assert!(store.load().is_empty());
}

#[test]
fn test_no_temp_file_left_behind() {
    let (dir, store) = setup();
    store.record_result(&decisive("Ann", "Bob"));
    let names: Vec<String> = fs::read_dir(dir.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["leaderboard.json".to_string()]);
}

#[test]
fn test_concurrent_saves_never_fail_or_tear() {
    let (dir, store) = setup();
    let mut big = Leaderboard::new();
    for i in 0..2000 {
        big.insert(LeaderboardEntry::with_totals(format!("player-{i:04}"), i, 1, 2));
    }

    let failures: usize = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    (0..40)
                        .filter(|_| {
                            let failed = store.save(&big).is_err();
                            assert!(store.load_strict().is_ok(), "document torn");
                            failed
                        })
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("thread")).sum()
    });

    assert_eq!(failures, 0);
    assert_eq!(store.load_strict().expect("readable"), big);
    let leftovers = fs::read_dir(dir.path()).expect("read dir").count();
    assert_eq!(leftovers, 1, "only the leaderboard file remains");
}

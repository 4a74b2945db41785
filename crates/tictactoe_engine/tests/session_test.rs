//! Tests for game sessions: moves, terminal detection, counters, resets.

use tictactoe_engine::rules::LINES;
use tictactoe_engine::{
    GameError, GameSession, GameStatus, Mark, MatchResult, MoveOutcome, PlayerName,
    PlayerNameError, Position, Square,
};

fn session() -> GameSession {
    GameSession::new("Ann", "Bob").expect("valid names")
}

fn play(session: &mut GameSession, cells: &[usize]) -> MoveOutcome {
    let mut last = MoveOutcome::Continue { next: Mark::X };
    for &cell in cells {
        last = session.apply_move(cell).expect("valid move");
    }
    last
}

fn name(raw: &str) -> PlayerName {
    PlayerName::parse(raw).expect("valid name")
}

/// Cells for O that never complete a line and never collide with `line`.
fn filler_for(line: [Position; 3]) -> Vec<usize> {
    let taken: Vec<usize> = line.iter().map(|p| p.to_index()).collect();
    (0..9).filter(|c| !taken.contains(c)).take(2).collect()
}

#[test]
fn test_row_example_wins_for_x() {
    let mut session = session();
    let outcome = play(&mut session, &[0, 3, 1, 4, 2]);

    assert_eq!(session.game().status(), GameStatus::Won(Mark::X));
    assert_eq!(*session.counters().x_wins(), 1);
    assert_eq!(*session.counters().total_matches(), 1);
    assert_eq!(
        outcome,
        MoveOutcome::Finished(MatchResult::Decisive {
            winner: name("Ann"),
            loser: name("Bob"),
        })
    );
}

#[test]
fn test_full_board_without_line_is_drawn() {
    let mut session = session();
    let outcome = play(&mut session, &[0, 1, 2, 4, 3, 6, 7, 5, 8]);

    assert_eq!(session.game().status(), GameStatus::Drawn);
    assert_eq!(session.game().board().occupied_count(), 9);
    assert_eq!(*session.counters().draws(), 1);
    assert_eq!(*session.counters().total_matches(), 1);
    assert_eq!(
        outcome,
        MoveOutcome::Finished(MatchResult::Draw {
            first: name("Ann"),
            second: name("Bob"),
        })
    );
}

#[test]
fn test_filling_move_that_completes_diagonal_is_a_win() {
    // X ends on 0, 2, 4, 7, 8: the board is full and 0-4-8 is complete.
    let mut session = session();
    play(&mut session, &[0, 1, 2, 3, 4, 5, 7, 6, 8]);

    assert_eq!(session.game().status(), GameStatus::Won(Mark::X));
    assert_eq!(*session.counters().draws(), 0);
    assert_eq!(*session.counters().x_wins(), 1);
}

#[test]
fn test_every_line_is_detected_for_x() {
    for line in LINES {
        let mut session = session();
        let o_cells = filler_for(line);
        let x_cells: Vec<usize> = line.iter().map(|p| p.to_index()).collect();

        let moves = [x_cells[0], o_cells[0], x_cells[1], o_cells[1], x_cells[2]];
        let mut outcome = MoveOutcome::Continue { next: Mark::X };
        for cell in moves {
            outcome = session.apply_move(cell).expect("valid move");
            if matches!(outcome, MoveOutcome::Finished(_)) {
                break;
            }
        }

        assert_eq!(
            session.game().status(),
            GameStatus::Won(Mark::X),
            "line {line:?} with O on {o_cells:?}"
        );
        assert!(matches!(outcome, MoveOutcome::Finished(_)));
    }
}

#[test]
fn test_every_line_is_detected_for_o() {
    for line in LINES {
        let mut session = session();
        let o_cells: Vec<usize> = line.iter().map(|p| p.to_index()).collect();
        // X plays three cells off the line that do not form a line themselves.
        let free: Vec<usize> = (0..9).filter(|c| !o_cells.contains(c)).collect();
        let x_cells = pick_non_winning(&free);

        let moves = [
            x_cells[0], o_cells[0], x_cells[1], o_cells[1], x_cells[2], o_cells[2],
        ];
        for cell in moves {
            session.apply_move(cell).expect("valid move");
        }
        assert_eq!(session.game().status(), GameStatus::Won(Mark::O), "line {line:?}");
    }
}

fn pick_non_winning(free: &[usize]) -> [usize; 3] {
    for a in 0..free.len() {
        for b in a + 1..free.len() {
            for c in b + 1..free.len() {
                let trio = [free[a], free[b], free[c]];
                let is_line = LINES.iter().any(|l| {
                    let mut idx: Vec<usize> = l.iter().map(|p| p.to_index()).collect();
                    idx.sort_unstable();
                    idx == trio
                });
                if !is_line {
                    return trio;
                }
            }
        }
    }
    unreachable!("six free cells always hold a non-line triple")
}

#[test]
fn test_occupied_count_tracks_applied_moves() {
    let mut session = session();
    for (applied, cell) in [4, 0, 8, 2, 6].into_iter().enumerate() {
        session.apply_move(cell).expect("valid move");
        assert_eq!(session.game().board().occupied_count(), applied + 1);
        assert_eq!(session.game().history().len(), applied + 1);
    }
    // A rejected move adds nothing.
    assert!(session.apply_move(4).is_err());
    assert_eq!(session.game().board().occupied_count(), 5);
}

#[test]
fn test_turn_alternates_until_terminal() {
    let mut session = session();
    for cell in [4, 0, 8, 2] {
        let before = session.game().current_player();
        let outcome = session.apply_move(cell).expect("valid move");
        assert_eq!(outcome, MoveOutcome::Continue { next: before.opponent() });
        assert_ne!(session.game().current_player(), before);
    }
}

#[test]
fn test_out_of_range_index_rejected() {
    let mut session = session();
    let before = session.clone();
    assert_eq!(session.apply_move(9), Err(GameError::InvalidCellIndex(9)));
    assert_eq!(session, before);
}

#[test]
fn test_occupied_cell_rejected() {
    let mut session = session();
    session.apply_move(4).expect("valid move");
    let before = session.clone();
    assert_eq!(
        session.apply_move(4),
        Err(GameError::CellOccupied(Position::Center))
    );
    assert_eq!(session, before);
}

#[test]
fn test_terminal_game_is_immutable() {
    let mut session = session();
    play(&mut session, &[0, 3, 1, 4, 2]);
    let before = session.clone();

    for cell in 0..10 {
        assert_eq!(session.apply_move(cell), Err(GameError::GameAlreadyOver));
    }
    assert_eq!(session, before);
    assert_eq!(*session.counters().total_matches(), 1);
}

#[test]
fn test_reset_keeps_counters_and_names() {
    let mut session = session();
    play(&mut session, &[0, 3, 1, 4, 2]);
    session.reset();

    assert_eq!(session.player_name(Mark::X).as_str(), "Ann");
    assert_eq!(session.player_name(Mark::O).as_str(), "Bob");
    assert_eq!(*session.counters().x_wins(), 1);
    assert_eq!(*session.counters().total_matches(), 1);
    assert_eq!(session.game().status(), GameStatus::InProgress);
    assert_eq!(session.game().current_player(), Mark::X);
    assert!(session.game().history().is_empty());
    assert!(
        session
            .game()
            .board()
            .squares()
            .iter()
            .all(|s| *s == Square::Empty)
    );

    // Counters keep accumulating on the next board.
    play(&mut session, &[0, 1, 2, 4, 3, 6, 7, 5, 8]);
    assert_eq!(*session.counters().draws(), 1);
    assert_eq!(*session.counters().total_matches(), 2);
}

#[test]
fn test_duplicate_names_rejected() {
    assert_eq!(
        GameSession::new("Ann", "Ann"),
        Err(GameError::InvalidPlayerName(PlayerNameError::Duplicate))
    );
}

#[test]
fn test_new_pairing_starts_with_zeroed_counters() {
    let session = GameSession::new("  Cara ", "Dev").expect("valid names");
    assert_eq!(session.player_name(Mark::X).as_str(), "Cara");
    assert_eq!(*session.counters().total_matches(), 0);
    assert_eq!(*session.counters().x_wins(), 0);
    assert_eq!(*session.counters().o_wins(), 0);
    assert_eq!(*session.counters().draws(), 0);
}

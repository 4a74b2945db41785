//! Two players sharing one terminal.
//!
//! Same rules and leaderboard as the HTTP server, read from a line-based
//! prompt. Generic over the streams so tests can script a whole match.

use crate::leaderboard::LeaderboardStore;
use std::io::{self, BufRead, Write};
use tictactoe_engine::{GameSession, MatchResult, MoveOutcome, Position};
use tracing::{debug, instrument};

/// Plays rounds until the players decline a rematch or input ends.
///
/// Each finished game is written to `store`.
///
/// # Errors
///
/// Returns any I/O error from `input` or `output`.
#[instrument(skip_all, fields(player_x = %session.pairing().player_x(), player_o = %session.pairing().player_o()))]
pub fn play<R: BufRead, W: Write>(
    session: &mut GameSession,
    store: &dyn LeaderboardStore,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    loop {
        let Some(result) = play_round(session, &mut input, &mut output)? else {
            debug!("Input closed mid-game");
            return Ok(());
        };

        match &result {
            MatchResult::Decisive { winner, .. } => writeln!(output, "{winner} is the winner!")?,
            MatchResult::Draw { .. } => writeln!(output, "Cats game!")?,
        }
        store.record_result(&result);

        let counters = session.counters();
        writeln!(
            output,
            "Session: {} {} - {} {}, {} drawn, {} played",
            session.pairing().player_x(),
            counters.x_wins(),
            counters.o_wins(),
            session.pairing().player_o(),
            counters.draws(),
            counters.total_matches()
        )?;

        write!(output, "Play again? [y/N] > ")?;
        output.flush()?;
        match read_line(&mut input)? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => session.reset(),
            _ => return Ok(()),
        }
    }
}

fn play_round<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<MatchResult>> {
    loop {
        writeln!(output, "\n{}\n", session.game().board().display())?;
        let mark = session.game().current_player();
        write!(output, "{} ({}) to move [0-8] > ", session.player_name(mark), mark)?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        let Ok(cell_index) = line.parse::<usize>() else {
            writeln!(output, "Invalid move!")?;
            write_open_cells(session, output)?;
            continue;
        };

        match session.apply_move(cell_index) {
            Ok(MoveOutcome::Continue { .. }) => {}
            Ok(MoveOutcome::Finished(result)) => {
                writeln!(output, "\n{}\n", session.game().board().display())?;
                return Ok(Some(result));
            }
            Err(e) => {
                writeln!(output, "Invalid move! {e}")?;
                write_open_cells(session, output)?;
            }
        }
    }
}

fn write_open_cells<W: Write>(session: &GameSession, output: &mut W) -> io::Result<()> {
    let open: Vec<String> = Position::valid_moves(session.game().board())
        .into_iter()
        .map(|pos| pos.to_index().to_string())
        .collect();
    writeln!(output, "Open cells: {}", open.join(", "))
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

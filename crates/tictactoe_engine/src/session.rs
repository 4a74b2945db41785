//! A pairing of two named players, their current board, and their running
//! tallies.
//!
//! A [`GameSession`] is the unit a web boundary stores between requests. It
//! is plain data with serde support; the boundary decides where it lives.

use crate::{Game, GameError, Mark, Pairing, PlayerName, Transition};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Cumulative results for one pairing. Survives board resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SessionCounters {
    /// Games won by X.
    x_wins: u32,
    /// Games won by O.
    o_wins: u32,
    /// Drawn games.
    draws: u32,
    /// Finished games.
    total_matches: u32,
}

impl SessionCounters {
    fn record(&mut self, status: Transition) {
        match status {
            Transition::Won(Mark::X) => self.x_wins += 1,
            Transition::Won(Mark::O) => self.o_wins += 1,
            Transition::Drawn => self.draws += 1,
            Transition::Continue(_) => return,
        }
        self.total_matches += 1;
    }
}

/// A finished game, phrased for the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// One player completed a line.
    Decisive {
        /// The winning player.
        winner: PlayerName,
        /// The other player.
        loser: PlayerName,
    },
    /// The board filled with no winner.
    Draw {
        /// Player X.
        first: PlayerName,
        /// Player O.
        second: PlayerName,
    },
}

impl MatchResult {
    /// Both participants, winner first for decisive games.
    pub fn players(&self) -> [&PlayerName; 2] {
        match self {
            MatchResult::Decisive { winner, loser } => [winner, loser],
            MatchResult::Draw { first, second } => [first, second],
        }
    }
}

/// What a successful move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game goes on; `next` moves.
    Continue {
        /// Mark to move next.
        next: Mark,
    },
    /// This move ended the game. Returned once per game.
    Finished(MatchResult),
}

/// One game between a fixed pair of players, plus the pair's tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameSession {
    /// The two players.
    pairing: Pairing,
    /// The board in play.
    game: Game,
    /// Tallies across every board this pairing has played.
    counters: SessionCounters,
}

impl GameSession {
    /// Starts a session for two players. `player_x_name` plays X.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPlayerName`] if either name is empty or
    /// longer than 50 characters after trimming, or if the names are equal.
    #[instrument(skip(player_x_name, player_o_name))]
    pub fn new(player_x_name: &str, player_o_name: &str) -> Result<Self, GameError> {
        let pairing = Pairing::new(player_x_name, player_o_name)?;
        info!(
            player_x = %pairing.player_x(),
            player_o = %pairing.player_o(),
            "New session"
        );
        Ok(Self {
            pairing,
            game: Game::new(),
            counters: SessionCounters::default(),
        })
    }

    /// Plays the current player's mark at `cell_index`.
    ///
    /// On the move that ends the game the session counters are updated and
    /// [`MoveOutcome::Finished`] carries the result to record. Later calls
    /// fail with [`GameError::GameAlreadyOver`], so a result is handed out
    /// once per game.
    ///
    /// # Errors
    ///
    /// Any [`GameError`] from [`Game::place`]; the session is unchanged.
    #[instrument(skip(self), fields(player_x = %self.pairing.player_x(), player_o = %self.pairing.player_o()))]
    pub fn apply_move(&mut self, cell_index: usize) -> Result<MoveOutcome, GameError> {
        let mover = self.pairing.name_of(self.game.current_player()).clone();
        let transition = self.game.place(cell_index, mover.as_str())?;
        self.counters.record(transition);

        let outcome = match transition {
            Transition::Continue(next) => MoveOutcome::Continue { next },
            Transition::Won(mark) => MoveOutcome::Finished(MatchResult::Decisive {
                winner: self.pairing.name_of(mark).clone(),
                loser: self.pairing.name_of(mark.opponent()).clone(),
            }),
            Transition::Drawn => MoveOutcome::Finished(MatchResult::Draw {
                first: self.pairing.player_x().clone(),
                second: self.pairing.player_o().clone(),
            }),
        };

        if let MoveOutcome::Finished(result) = &outcome {
            info!(?result, total_matches = self.counters.total_matches, "Game finished");
        }
        Ok(outcome)
    }

    /// Clears the board for another game between the same players.
    /// Counters carry over.
    #[instrument(skip(self), fields(total_matches = self.counters.total_matches))]
    pub fn reset(&mut self) {
        info!("Board reset");
        self.game = Game::new();
    }

    /// Name of the player holding `mark`.
    pub fn player_name(&self, mark: Mark) -> &PlayerName {
        self.pairing.name_of(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameStatus;

    fn play(session: &mut GameSession, cells: &[usize]) -> MoveOutcome {
        let mut last = MoveOutcome::Continue { next: Mark::X };
        for &cell in cells {
            last = session.apply_move(cell).expect("valid move");
        }
        last
    }

    #[test]
    fn test_history_records_player_names() {
        let mut session = GameSession::new("Ann", "Bob").expect("valid names");
        play(&mut session, &[4, 0]);
        let history: Vec<String> = session
            .game()
            .history()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            history,
            vec!["Ann (X) played at cell 5", "Bob (O) played at cell 1"]
        );
    }

    #[test]
    fn test_o_win_names_winner_and_loser() {
        let mut session = GameSession::new("Ann", "Bob").expect("valid names");
        let outcome = play(&mut session, &[0, 3, 1, 4, 8, 5]);
        assert_eq!(
            outcome,
            MoveOutcome::Finished(MatchResult::Decisive {
                winner: PlayerName::parse("Bob").unwrap(),
                loser: PlayerName::parse("Ann").unwrap(),
            })
        );
        assert_eq!(*session.counters().o_wins(), 1);
        assert_eq!(*session.counters().x_wins(), 0);
        assert_eq!(*session.counters().total_matches(), 1);
    }

    #[test]
    fn test_reset_board_keeps_pairing_and_counters() {
        let mut session = GameSession::new("Ann", "Bob").expect("valid names");
        play(&mut session, &[0, 3, 1, 4, 2]);
        let mut next = session.clone();
        next.reset();
        assert_eq!(next.pairing(), session.pairing());
        assert_eq!(next.counters(), session.counters());
        assert_eq!(next.game().status(), GameStatus::InProgress);
        assert_eq!(next.game().current_player(), Mark::X);
        assert!(next.game().history().is_empty());
    }

    #[test]
    fn test_session_serializes() {
        let mut session = GameSession::new("Ann", "Bob").expect("valid names");
        play(&mut session, &[4]);
        let json = serde_json::to_string(&session).expect("serialize");
        let restored: GameSession = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, session);
    }
}

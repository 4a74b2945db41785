//! JSON shapes exchanged with browser clients.

use crate::leaderboard::LeaderboardEntry;
use crate::sessions::SessionId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tictactoe_engine::{Game, GameSession, Mark};

/// Body of `POST /api/games`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StartGameRequest {
    /// Plays X.
    pub player1_name: String,
    /// Plays O.
    pub player2_name: String,
}

/// Body of `POST /api/games/{id}/moves`.
///
/// `cell_index` is accepted as a JSON number or a numeric string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MoveRequest {
    /// Cell 0-8, row-major.
    pub cell_index: Value,
}

impl MoveRequest {
    /// The requested cell as a non-negative integer, if it is one.
    ///
    /// Values above 8 pass through so the game can reject them.
    pub fn cell_index(&self) -> Option<usize> {
        match &self.cell_index {
            Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Board, turn, and status of the current game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Nine cells: `"X"`, `"O"`, or `""`.
    pub board: Vec<String>,
    /// Mark to move; after a terminal move, the mark that made it.
    pub current_player: Mark,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Winning mark, if any.
    pub winner: Option<Mark>,
    /// Whether the game ended in a draw.
    pub draw: bool,
    /// Human-readable move log, oldest first.
    pub move_history: Vec<String>,
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        Self {
            board: game
                .board()
                .squares()
                .iter()
                .map(|square| square.symbol().to_string())
                .collect(),
            current_player: game.current_player(),
            game_over: game.status().is_over(),
            winner: game.winner(),
            draw: game.status() == tictactoe_engine::GameStatus::Drawn,
            move_history: game.history().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Player names by mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayersView {
    /// Player holding X.
    #[serde(rename = "X")]
    pub x: String,
    /// Player holding O.
    #[serde(rename = "O")]
    pub o: String,
}

/// Running tallies for the pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatsView {
    /// Player holding X.
    #[serde(rename = "X_name")]
    pub x_name: String,
    /// Player holding O.
    #[serde(rename = "O_name")]
    pub o_name: String,
    /// Games won by X.
    pub session_x_wins: u32,
    /// Games won by O.
    pub session_o_wins: u32,
    /// Drawn games.
    pub session_draws: u32,
    /// Finished games.
    pub session_total_matches: u32,
}

/// Full session state returned by every game endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResponse {
    /// Always true.
    pub success: bool,
    /// Id for follow-up requests.
    pub session_id: SessionId,
    /// Current game.
    pub game: GameView,
    /// Names by mark.
    pub players: PlayersView,
    /// Pairing tallies.
    pub current_game_stats: SessionStatsView,
}

impl GameResponse {
    /// Projects a session into its client view.
    pub fn new(session_id: SessionId, session: &GameSession) -> Self {
        let x = session.player_name(Mark::X).to_string();
        let o = session.player_name(Mark::O).to_string();
        let counters = session.counters();
        Self {
            success: true,
            session_id,
            game: GameView::from(session.game()),
            players: PlayersView {
                x: x.clone(),
                o: o.clone(),
            },
            current_game_stats: SessionStatsView {
                x_name: x,
                o_name: o,
                session_x_wins: *counters.x_wins(),
                session_o_wins: *counters.o_wins(),
                session_draws: *counters.draws(),
                session_total_matches: *counters.total_matches(),
            },
        }
    }
}

/// Body of `GET /api/leaderboard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    /// Always true.
    pub success: bool,
    /// Records ranked by wins, then fewest losses, then name.
    pub standings: Vec<LeaderboardEntry>,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false.
    pub success: bool,
    /// What went wrong.
    pub error: String,
}

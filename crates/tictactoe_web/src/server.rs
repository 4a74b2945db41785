//! HTTP boundary: routes, handlers, and error mapping.
//!
//! Handlers validate raw input, run one engine operation on the stored
//! session under the registry lock, and return the projected session. A
//! move that ends a game also writes the leaderboard.

use crate::leaderboard::LeaderboardStore;
use crate::sessions::{SessionId, SessionManager};
use crate::views::{
    ErrorResponse, GameResponse, LeaderboardResponse, MoveRequest, StartGameRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use derive_more::{Display, From};
use derive_new::new;
use std::sync::Arc;
use tictactoe_engine::{GameError, GameSession, MatchResult, MoveOutcome};
use tracing::{debug, info, instrument, warn};

/// Shared state for every handler.
#[derive(Debug, Clone, new)]
pub struct AppState {
    sessions: SessionManager,
    leaderboard: Arc<dyn LeaderboardStore>,
}

impl AppState {
    /// Live sessions.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Durable leaderboard.
    pub fn leaderboard(&self) -> &Arc<dyn LeaderboardStore> {
        &self.leaderboard
    }

    /// Writes a finished game to the leaderboard off the async runtime.
    #[instrument(skip(self))]
    async fn record(&self, result: MatchResult) {
        let store = Arc::clone(&self.leaderboard);
        if let Err(e) = tokio::task::spawn_blocking(move || store.record_result(&result)).await {
            warn!(error = %e, "Leaderboard task failed");
        }
    }
}

/// Failure of a request, rendered as `{"success": false, "error": ...}`.
#[derive(Debug, Display, From)]
pub enum ApiError {
    /// The game rejected the operation.
    #[from]
    Game(GameError),
    /// No live session under the given id.
    #[display("Game not started. Please start a new game.")]
    SessionNotFound,
    /// `cell_index` was missing or not a non-negative integer.
    #[display("Invalid cell index provided.")]
    InvalidCellIndex,
    /// The request body was not valid JSON for the endpoint.
    #[display("Malformed request: {}", _0)]
    MalformedBody(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionNotFound => StatusCode::NOT_FOUND,
            ApiError::Game(_) | ApiError::InvalidCellIndex | ApiError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(%status, error = %self, "Request rejected");
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/games", post(start_game))
        .route("/api/games/{id}", get(get_game).delete(end_game))
        .route("/api/games/{id}/moves", post(make_move))
        .route("/api/games/{id}/reset", post(reset_board))
        .route("/api/leaderboard", get(leaderboard))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    info!(%method, %uri, status = %response.status(), "Handled request");
    response
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse().map_err(|_| {
        debug!(session_id = raw, "Unparseable session id");
        ApiError::SessionNotFound
    })
}

#[instrument]
async fn health() -> &'static str {
    "ok"
}

#[instrument(skip(state, payload))]
async fn start_game(
    State(state): State<AppState>,
    payload: Result<Json<StartGameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GameResponse>), ApiError> {
    let Json(request) = payload?;
    let session = GameSession::new(&request.player1_name, &request.player2_name)?;
    let response_session = session.clone();
    let id = state.sessions.create_session(session);
    Ok((
        StatusCode::CREATED,
        Json(GameResponse::new(id, &response_session)),
    ))
}

#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let id = parse_session_id(&id)?;
    let session = state
        .sessions
        .get_session(&id)
        .ok_or(ApiError::SessionNotFound)?;
    Ok(Json(GameResponse::new(id, &session)))
}

#[instrument(skip(state, payload))]
async fn make_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<GameResponse>, ApiError> {
    let id = parse_session_id(&id)?;
    let Json(request) = payload?;
    let cell_index = request.cell_index().ok_or(ApiError::InvalidCellIndex)?;

    let (outcome, session) = state
        .sessions
        .with_session(&id, |session| {
            session
                .apply_move(cell_index)
                .map(|outcome| (outcome, session.clone()))
        })
        .ok_or(ApiError::SessionNotFound)??;

    if let MoveOutcome::Finished(result) = outcome {
        state.record(result).await;
    }
    Ok(Json(GameResponse::new(id, &session)))
}

#[instrument(skip(state))]
async fn reset_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let id = parse_session_id(&id)?;
    let session = state
        .sessions
        .with_session(&id, |session| {
            session.reset();
            session.clone()
        })
        .ok_or(ApiError::SessionNotFound)?;
    Ok(Json(GameResponse::new(id, &session)))
}

#[instrument(skip(state))]
async fn end_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_session_id(&id)?;
    state
        .sessions
        .remove_session(&id)
        .ok_or(ApiError::SessionNotFound)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
async fn leaderboard(State(state): State<AppState>) -> Json<LeaderboardResponse> {
    let store = Arc::clone(&state.leaderboard);
    let standings = tokio::task::spawn_blocking(move || store.standings())
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Leaderboard task failed");
            Vec::new()
        });
    Json(LeaderboardResponse {
        success: true,
        standings,
    })
}

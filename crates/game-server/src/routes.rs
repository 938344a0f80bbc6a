use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use game_core::engine::{self, Cell, Move};
use game_core::session::{GameSession, GameStatus};
use serde::{Deserialize, Serialize};

use crate::app::{AppState, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::input;

#[derive(Clone, Serialize)]
struct TileResponse {
    id: String,
    value: Cell,
    row: usize,
    col: usize,
}

/// Full snapshot of the session, returned after every state change.
#[derive(Serialize)]
pub(crate) struct SessionResponse {
    board: Vec<Vec<Cell>>,
    tiles: Vec<TileResponse>,
    score: u64,
    best_score: u64,
    status: GameStatus,
    board_size: usize,
}

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: String,
}

/// A move request names either a logical direction or a raw key to resolve.
#[derive(Deserialize, Default)]
pub(crate) struct MoveRequest {
    #[serde(default)]
    direction: Option<Move>,
    #[serde(default)]
    key: Option<String>,
}

#[derive(Deserialize, Default)]
pub(crate) struct RestartRequest {
    #[serde(default)]
    size: Option<usize>,
}

fn snapshot(session: &GameSession) -> SessionResponse {
    let board = session.board();
    let tiles = engine::tiles_with_positions(board)
        .into_iter()
        .map(|tile| TileResponse {
            id: tile.key(),
            value: tile.value,
            row: tile.row,
            col: tile.col,
        })
        .collect();
    SessionResponse {
        board: board.to_rows(),
        tiles,
        score: session.score(),
        best_score: session.best_score(),
        status: session.status(),
        board_size: session.size(),
    }
}

pub(crate) async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub(crate) async fn get_state(State(state): State<AppState>) -> Json<SessionResponse> {
    let service = state.service.lock().expect("service lock poisoned");
    Json(snapshot(service.session()))
}

pub(crate) async fn post_move(
    State(state): State<AppState>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<SessionResponse>, (StatusCode, String)> {
    let direction = match (request.direction, request.key.as_deref()) {
        (Some(direction), _) => direction,
        (None, Some(key)) => input::direction_for_key(key)
            .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("key {key:?} is not a move")))?,
        (None, None) => {
            return Err((
                StatusCode::BAD_REQUEST,
                "either direction or key is required".to_string(),
            ));
        }
    };
    let mut service = state.service.lock().expect("service lock poisoned");
    // A rejected or no-op move still answers with the unchanged snapshot.
    service.apply_move(direction);
    Ok(Json(snapshot(service.session())))
}

pub(crate) async fn post_restart(
    State(state): State<AppState>,
    Json(request): Json<RestartRequest>,
) -> Result<Json<SessionResponse>, (StatusCode, String)> {
    if let Some(size) = request.size {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("board size {size} is outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}"),
            ));
        }
    }
    let mut service = state.service.lock().expect("service lock poisoned");
    service
        .restart(request.size)
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;
    Ok(Json(snapshot(service.session())))
}

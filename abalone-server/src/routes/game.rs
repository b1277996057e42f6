//! Game API endpoints
//!
//! Moves, legal-destination overlays, undo/reset and state transfer for the
//! single shared game.

use std::sync::Arc;

use abalone_core::{
    Direction, GameError, GameState, Hex, Message, MoveKind, MoveRecord, Player, Snapshot,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::ApiError;
use crate::state::ServerState;

/// Everything the board view needs in one response
#[derive(Serialize)]
pub struct GameView {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    pub remaining_black: usize,
    pub remaining_white: usize,
    pub last_move: Option<MoveRecord>,
    pub history_len: usize,
}

impl GameView {
    fn of(game: &GameState) -> Self {
        Self {
            snapshot: game.snapshot(),
            remaining_black: game.remaining(Player::Black),
            remaining_white: game.remaining(Player::White),
            last_move: game.last_move().cloned(),
            history_len: game.history().len(),
        }
    }
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub group: Vec<Hex>,
    pub destination: Hex,
    /// Side the client plays, checked against the side to move
    pub player: Option<Player>,
    /// Client's ply, checked against the server's
    pub ply: Option<u32>,
}

#[derive(Deserialize)]
pub struct LegalRequest {
    pub group: Vec<Hex>,
}

#[derive(Serialize)]
pub struct Destination {
    pub hex: Hex,
    pub kind: MoveKind,
    pub direction: Direction,
    pub pushed: u8,
}

/// Get the current game
pub async fn get_game(State(state): State<Arc<ServerState>>) -> Json<GameView> {
    let game = state.read_game();
    Json(GameView::of(&game))
}

/// Validate and apply a move
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut game = state.write_game();

    if let Some(ply) = req.ply {
        if ply != game.ply() {
            return Err(GameError::OutOfSequence {
                expected: game.ply(),
                got: ply,
            }
            .into());
        }
    }

    let record = match req.player {
        Some(player) => game.attempt_move_as(player, &req.group, req.destination)?,
        None => game.attempt_move(&req.group, req.destination)?,
    };

    Ok(Json(json!({
        "success": true,
        "record": record,
        "state": GameView::of(&game),
    })))
}

/// Legal destinations for a selection of the side to move
pub async fn legal_destinations(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<LegalRequest>,
) -> Result<Json<Value>, ApiError> {
    let game = state.read_game();
    let destinations: Vec<Destination> = game
        .legal_destinations(&req.group)?
        .into_iter()
        .map(|plan| Destination {
            hex: plan.destination,
            kind: plan.kind,
            direction: plan.direction,
            pushed: plan.pushed,
        })
        .collect();

    Ok(Json(json!({ "destinations": destinations })))
}

/// Start over from the standard layout
pub async fn reset_game(State(state): State<Arc<ServerState>>) -> Json<Value> {
    let mut game = state.write_game();
    game.reset();
    Json(json!({ "success": true, "state": GameView::of(&game) }))
}

/// Take back the last move
pub async fn undo_move(State(state): State<Arc<ServerState>>) -> Result<Json<Value>, ApiError> {
    let mut game = state.write_game();
    let undone = game.undo()?;
    Ok(Json(json!({
        "success": true,
        "undone": undone,
        "state": GameView::of(&game),
    })))
}

/// Export the full state
pub async fn get_snapshot(State(state): State<Arc<ServerState>>) -> Json<Snapshot> {
    Json(state.read_game().snapshot())
}

/// Overwrite the full state
pub async fn put_snapshot(
    State(state): State<Arc<ServerState>>,
    Json(snapshot): Json<Snapshot>,
) -> Result<Json<Value>, ApiError> {
    let mut game = state.write_game();
    game.restore(snapshot)?;
    Ok(Json(json!({ "success": true, "state": GameView::of(&game) })))
}

/// Apply a peer message
pub async fn apply_message(
    State(state): State<Arc<ServerState>>,
    Json(message): Json<Message>,
) -> Result<Json<Value>, ApiError> {
    let mut game = state.write_game();
    let record = game.apply_message(message)?;
    Ok(Json(json!({
        "success": true,
        "record": record,
        "state": GameView::of(&game),
    })))
}

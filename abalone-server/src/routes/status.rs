//! Liveness plus a one-line summary of the live game

use std::sync::Arc;

use abalone_core::Player;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::ServerState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub ply: u32,
    pub to_move: Player,
    pub ended: bool,
    pub winner: Option<Player>,
    pub captured_black: u8,
    pub captured_white: u8,
}

/// Cheap poll target for peers waiting on the other side's move
pub async fn status_handler(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    let game = state.read_game();
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        ply: game.ply(),
        to_move: game.current_player(),
        ended: game.is_ended(),
        winner: game.winner(),
        captured_black: game.captured(Player::Black),
        captured_white: game.captured(Player::White),
    })
}

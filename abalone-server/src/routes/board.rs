//! Board geometry endpoint

use abalone_core::{Direction, ALL_HEXES, BOARD_RADIUS};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct BoardInfo {
    pub radius: i8,
    pub hexes: Vec<[i8; 2]>,
    pub directions: Vec<[i8; 2]>,
    pub direction_names: Vec<&'static str>,
}

/// Get board geometry
pub async fn get_board() -> Json<BoardInfo> {
    Json(BoardInfo {
        radius: BOARD_RADIUS,
        hexes: ALL_HEXES.iter().map(|hex| [hex.q, hex.r]).collect(),
        directions: Direction::ALL
            .iter()
            .map(|direction| {
                let (dq, dr) = direction.vector();
                [dq, dr]
            })
            .collect(),
        direction_names: Direction::ALL.iter().map(|direction| direction.name()).collect(),
    })
}

//! HTTP route handlers

pub mod board;
pub mod game;
pub mod status;

use abalone_core::GameError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// A rejected game request, answered as `{ error, kind }`
#[derive(Debug)]
pub struct ApiError(pub GameError);

impl From<GameError> for ApiError {
    fn from(error: GameError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            GameError::OutOfSequence { .. } | GameError::WrongTurn { .. } => StatusCode::CONFLICT,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = Json(json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        }));
        (status, body).into_response()
    }
}

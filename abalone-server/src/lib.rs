//! Abalone Server - HTTP API for the board UI
//!
//! This crate provides the web backend:
//! - REST API for moves, legal-destination overlays, undo and reset
//! - Snapshot export/import and peer message relay
//! - Static file serving for the UI

mod routes;
mod state;

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use routes::ApiError;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8003,
            static_dir: "web".to_string(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Board geometry
        .route("/api/board", get(routes::board::get_board))
        // Game API
        .route("/api/game", get(routes::game::get_game))
        .route("/api/game/move", post(routes::game::make_move))
        .route("/api/game/legal", post(routes::game::legal_destinations))
        .route("/api/game/reset", post(routes::game::reset_game))
        .route("/api/game/undo", post(routes::game::undo_move))
        .route(
            "/api/game/snapshot",
            get(routes::game::get_snapshot).put(routes::game::put_snapshot),
        )
        .route("/api/game/message", post(routes::game::apply_message))
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive())
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server on a fresh game
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    serve(config, Arc::new(ServerState::new())).await
}

/// Start the HTTP server on an existing game, e.g. one resumed from a snapshot
pub async fn serve(config: ServerConfig, state: Arc<ServerState>) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    {
        let game = state.read_game();
        tracing::info!(
            ply = game.ply(),
            to_move = %game.current_player(),
            "Abalone server starting on http://0.0.0.0:{}",
            config.port
        );
    }
    tracing::info!("Static files served from: {}", config.static_dir);

    let router = create_router(&config, state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

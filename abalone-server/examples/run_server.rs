//! Serve a game resumed from a saved snapshot
//!
//! Run with: cargo run -p abalone-server --example run_server -- saved.json
//!
//! Without an argument the server starts from the standard layout.

use std::sync::Arc;

use abalone_core::{GameState, Snapshot};
use abalone_server::{serve, ServerConfig, ServerState};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut game = GameState::new();
    if let Some(path) = std::env::args().nth(1) {
        let content = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
        let snapshot: Snapshot = serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path))?;
        game.restore(snapshot)?;
        println!("Resumed at ply {}, {} to move", game.ply(), game.current_player());
    }

    let config = ServerConfig::default();
    println!("Open http://localhost:{}/", config.port);

    serve(config, Arc::new(ServerState::with_game(game))).await
}

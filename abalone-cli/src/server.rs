//! Serve command - host one game over HTTP, fresh or resumed from a snapshot
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), load_game(), start_server()
//! - Level 3: check_static_dir(), read_snapshot()

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use abalone_core::{GameState, Snapshot};
use abalone_server::{serve, ServerConfig, ServerState};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8003")]
    pub port: u16,

    /// Directory containing the board UI
    #[arg(long, default_value = "web")]
    pub static_dir: PathBuf,

    /// Resume the game saved in this snapshot file (GET /api/game/snapshot)
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run serve command
///
/// 1. Build the server config
/// 2. Load the starting game
/// 3. Serve it (blocking)
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;
    let game = load_game(args.snapshot.as_deref())?;

    start_server(config, game)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    check_static_dir(&args.static_dir)?;

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
    })
}

/// Standard layout, or the validated game from `snapshot`
fn load_game(snapshot: Option<&Path>) -> Result<GameState> {
    let mut game = GameState::new();
    if let Some(path) = snapshot {
        let saved = read_snapshot(path)?;
        game.restore(saved)
            .with_context(|| format!("Snapshot rejected: {}", path.display()))?;
        tracing::info!(
            "Resuming {} at ply {}, {} to move",
            path.display(),
            game.ply(),
            game.current_player()
        );
    }
    Ok(game)
}

fn start_server(config: ServerConfig, game: GameState) -> Result<()> {
    let state = Arc::new(ServerState::with_game(game));
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(config, state))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// The API works without the board UI, so only a file in its place is an error
fn check_static_dir(path: &Path) -> Result<()> {
    if path.is_file() {
        anyhow::bail!("Static path is a file, not a directory: {}", path.display());
    }
    if !path.exists() {
        tracing::warn!("No board UI at {}, serving the API only", path.display());
    }
    Ok(())
}

fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}

// ============================================================================
// TESTS
// ============================================================================

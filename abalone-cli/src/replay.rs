//! Replay command - apply a recorded move list to a fresh game
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_moves(), replay_moves(), report()
//! - Level 3: parse_moves(), render_board()

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

use abalone_core::{Cell, GameError, GameState, Hex, Player, BOARD_RADIUS};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON move list: `{"moves": [...]}` or a bare array
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the final snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Stop at the first illegal move instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

/// One recorded move
#[derive(Clone, Debug, Deserialize)]
struct RecordedMove {
    group: Vec<Hex>,
    destination: Hex,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MoveFile {
    Record { moves: Vec<RecordedMove> },
    Bare(Vec<RecordedMove>),
}

/// Final game plus the moves that did not apply
struct ReplayOutcome {
    game: GameState,
    applied: usize,
    skipped: Vec<(usize, GameError)>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run replay command
///
/// 1. Load the move list
/// 2. Apply every move in order
/// 3. Report the final position
pub fn run(args: ReplayArgs) -> Result<()> {
    let moves = load_moves(&args.file)?;

    tracing::info!("Replaying {} moves from {}", moves.len(), args.file.display());

    let outcome = replay_moves(&moves, args.strict)?;

    report(&outcome, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_moves(path: &Path) -> Result<Vec<RecordedMove>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read move list: {}", path.display()))?;
    parse_moves(&content).with_context(|| format!("Failed to parse move list: {}", path.display()))
}

fn replay_moves(moves: &[RecordedMove], strict: bool) -> Result<ReplayOutcome> {
    let mut game = GameState::new();
    let mut applied = 0;
    let mut skipped = Vec::new();

    for (index, recorded) in moves.iter().enumerate() {
        match game.attempt_move(&recorded.group, recorded.destination) {
            Ok(_) => applied += 1,
            Err(e) if strict => {
                anyhow::bail!("Move {} ({:?} -> {}) rejected: {}", index, recorded.group, recorded.destination, e);
            }
            Err(e) => {
                tracing::warn!("Skipping move {}: {}", index, e);
                skipped.push((index, e));
            }
        }
    }

    Ok(ReplayOutcome {
        game,
        applied,
        skipped,
    })
}

fn report(outcome: &ReplayOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.game.snapshot())?);
        return Ok(());
    }

    let game = &outcome.game;
    println!("{}", render_board(game));
    println!("Moves applied: {}", outcome.applied);
    println!(
        "Captured:      black {} / white {}",
        game.captured(Player::Black),
        game.captured(Player::White)
    );
    match game.winner() {
        Some(winner) => println!("Result:        {} wins", winner),
        None => println!("Result:        ongoing, {} to move", game.current_player()),
    }
    if !outcome.skipped.is_empty() {
        println!("\nSkipped moves:");
        for (index, error) in &outcome.skipped {
            println!("  #{}: {}", index, error);
        }
    }

    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn parse_moves(content: &str) -> Result<Vec<RecordedMove>> {
    let file: MoveFile = serde_json::from_str(content)?;
    Ok(match file {
        MoveFile::Record { moves } => moves,
        MoveFile::Bare(moves) => moves,
    })
}

/// Rows by `r`, each shifted so that the hexagon reads naturally
fn render_board(game: &GameState) -> String {
    let board = game.board();
    let mut lines = Vec::new();

    for r in -BOARD_RADIUS..=BOARD_RADIUS {
        let cells: Vec<&str> = (-BOARD_RADIUS..=BOARD_RADIUS)
            .filter_map(|q| board.get(Hex::new(q, r)))
            .map(|cell| match cell {
                Cell::Empty => ".",
                Cell::Black => "B",
                Cell::White => "W",
            })
            .collect();
        let indent = " ".repeat(r.unsigned_abs() as usize);
        lines.push(format!("{}{}", indent, cells.join(" ")));
    }

    lines.join("\n")
}

// ============================================================================
// TESTS
// ============================================================================

//! Abalone Core - Move legality and execution engine
//!
//! This crate provides the rules of Abalone on the 61-cell hexagonal board:
//! - Board geometry (axial coordinates, radius 4)
//! - Group selection and validation
//! - Move classification (single, inline push, sidestep)
//! - Move execution with captures off the edge
//! - Game state with turns, score, win detection, undo and snapshots
//! - Wire messages for keeping peers in step

pub mod board;
pub mod error;
pub mod execute;
pub mod game;
pub mod group;
pub mod moves;
pub mod protocol;

// Re-exports for convenient access
pub use board::{Board, Cell, Direction, Hex, Stone, ALL_HEXES, BOARD_RADIUS, CELL_COUNT};
pub use error::{BoardError, GameError, IllegalMove, SelectionError};
pub use execute::{Capture, MoveRecord};
pub use game::{GameResult, GameState, Player, Snapshot, CAPTURES_TO_WIN, PIECES_PER_SIDE};
pub use group::{Group, MAX_GROUP_SIZE};
pub use moves::{MoveKind, MovePlan};
pub use protocol::Message;

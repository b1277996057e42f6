//! Error types for selection, move legality, and game flow

use thiserror::Error;

use crate::board::Hex;
use crate::game::Player;

/// Rejected board encodings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("hex {0} is not on the board")]
    OffBoard(Hex),

    #[error("hex {0} is listed more than once")]
    Duplicate(Hex),
}

/// Reasons a selection cannot form a group
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no marbles selected")]
    Empty,

    #[error("{0} marbles selected, at most 3 move together")]
    TooMany(usize),

    #[error("hex {0} is not on the board")]
    OffBoard(Hex),

    #[error("hex {0} selected twice")]
    Duplicate(Hex),

    #[error("hex {0} does not hold a marble of the player to move")]
    NotOwned(Hex),

    #[error("selected marbles are not adjacent")]
    NotAdjacent,

    #[error("selected marbles do not form a straight line")]
    NotInLine,
}

/// Reasons a group cannot reach a destination
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("hex {0} is not on the board")]
    OffBoard(Hex),

    #[error("destination is not one step away")]
    NotAdjacent,

    #[error("hex {0} is occupied")]
    Occupied(Hex),

    #[error("own marble at {0} blocks the push")]
    BlockedByOwn(Hex),

    #[error("{group} marbles cannot push {run}")]
    Outnumbered { group: u8, run: u8 },

    #[error("sidestep must leave the group's line")]
    NotPerpendicular,
}

/// Errors surfaced by `GameState`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    #[error("invalid move: {0}")]
    InvalidMove(#[from] IllegalMove),

    #[error("game is over")]
    GameOver,

    #[error("it is {expected}'s turn, not {got}'s")]
    WrongTurn { expected: Player, got: Player },

    #[error("no move to undo")]
    NothingToUndo,

    #[error("move for ply {got} arrived at ply {expected}")]
    OutOfSequence { expected: u32, got: u32 },

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl GameError {
    /// Stable variant name for API clients
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::InvalidSelection(_) => "invalid_selection",
            GameError::InvalidMove(_) => "invalid_move",
            GameError::GameOver => "game_over",
            GameError::WrongTurn { .. } => "wrong_turn",
            GameError::NothingToUndo => "nothing_to_undo",
            GameError::OutOfSequence { .. } => "out_of_sequence",
            GameError::InvalidSnapshot(_) => "invalid_snapshot",
        }
    }
}

//! Wire messages exchanged between peers sharing one game
//!
//! Moves carry the sender's ply so that both sides apply them in lock-step.
//! A peer that falls out of step resynchronizes with a full `State` message.

use serde::{Deserialize, Serialize};

use crate::board::Hex;
use crate::error::GameError;
use crate::execute::MoveRecord;
use crate::game::{GameState, Snapshot};

/// One message on the wire, tagged by `"type"`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// A move made at `ply` on the sender's side
    Move {
        ply: u32,
        group: Vec<Hex>,
        destination: Hex,
    },
    /// Full state overwrite
    State { snapshot: Snapshot },
    Reset,
}

impl Message {
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn decode(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

impl GameState {
    /// Apply a message received from a peer.
    ///
    /// Returns the move record for `Move` messages and `None` otherwise.
    pub fn apply_message(&mut self, message: Message) -> Result<Option<MoveRecord>, GameError> {
        match message {
            Message::Move {
                ply,
                group,
                destination,
            } => {
                if ply != self.ply() {
                    tracing::warn!("Dropping move for ply {} at ply {}", ply, self.ply());
                    return Err(GameError::OutOfSequence {
                        expected: self.ply(),
                        got: ply,
                    });
                }
                self.attempt_move(&group, destination).map(Some)
            }
            Message::State { snapshot } => self.restore(snapshot).map(|()| None),
            Message::Reset => {
                self.reset();
                Ok(None)
            }
        }
    }

    /// Outbound message for a move about to be made locally
    pub fn move_message(&self, selection: &[Hex], destination: Hex) -> Message {
        Message::Move {
            ply: self.ply(),
            group: selection.to_vec(),
            destination,
        }
    }
}

//! Server state management
//!
//! One shared game, guarded by a single lock so that every move is resolved,
//! classified and executed against the same board.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use abalone_core::GameState;

/// Server-wide shared state
pub struct ServerState {
    game: RwLock<GameState>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::with_game(GameState::new())
    }

    pub fn with_game(game: GameState) -> Self {
        Self {
            game: RwLock::new(game),
        }
    }

    /// Shared access for read-only requests.
    ///
    /// `GameState` is never left half-updated, so a poisoned lock is still usable.
    pub fn read_game(&self) -> RwLockReadGuard<'_, GameState> {
        self.game.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Exclusive access for requests that change the game
    pub fn write_game(&self) -> RwLockWriteGuard<'_, GameState> {
        self.game.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

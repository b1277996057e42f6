//! Game state: turn order, score, win detection, snapshots

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Hex};
use crate::error::GameError;
use crate::execute::{self, MoveRecord};
use crate::group::{self, Group};
use crate::moves::{self, MovePlan};

/// Marbles each side starts with
pub const PIECES_PER_SIDE: u8 = 14;

/// Captures needed to win
pub const CAPTURES_TO_WIN: u8 = 6;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Black => "black",
            Player::White => "white",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    BlackWins,
    WhiteWins,
}

impl GameResult {
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::Black => GameResult::BlackWins,
            Player::White => GameResult::WhiteWins,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Ongoing => None,
            GameResult::BlackWins => Some(Player::Black),
            GameResult::WhiteWins => Some(Player::White),
        }
    }
}

/// Full game state as exchanged with peers and the UI
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub current_player: Player,
    /// Black marbles pushed off the board
    pub captured_black: u8,
    /// White marbles pushed off the board
    pub captured_white: u8,
    pub ended: bool,
    pub winner: Option<Player>,
    /// Moves applied since the last reset
    pub ply: u32,
}

impl Snapshot {
    pub fn captured(&self, player: Player) -> u8 {
        match player {
            Player::Black => self.captured_black,
            Player::White => self.captured_white,
        }
    }

    /// Check internal consistency before this snapshot replaces live state.
    ///
    /// Every marble must be accounted for: on the board or captured.
    pub fn validate(&self) -> Result<(), GameError> {
        for player in [Player::Black, Player::White] {
            let remaining = self.board.count(player);
            let captured = self.captured(player) as usize;
            if remaining + captured != PIECES_PER_SIDE as usize {
                return Err(GameError::InvalidSnapshot(format!(
                    "{player} has {remaining} marbles on the board and {captured} captured"
                )));
            }
        }

        if self.ended != self.winner.is_some() {
            return Err(GameError::InvalidSnapshot(
                "ended flag and winner disagree".to_string(),
            ));
        }

        match self.winner {
            Some(winner) if self.captured(winner.opponent()) < CAPTURES_TO_WIN => {
                Err(GameError::InvalidSnapshot(format!(
                    "{winner} is marked as winner without {CAPTURES_TO_WIN} captures"
                )))
            }
            None if self.captured_black >= CAPTURES_TO_WIN
                || self.captured_white >= CAPTURES_TO_WIN =>
            {
                Err(GameError::InvalidSnapshot(
                    "capture limit reached but game not ended".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

/// One game of Abalone.
///
/// All mutation goes through `attempt_move`, `undo`, `reset` and `restore`;
/// a rejected call leaves the state untouched.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    current_player: Player,
    captured_black: u8,
    captured_white: u8,
    result: GameResult,
    history: Vec<MoveRecord>,
    /// State before each entry of `history`
    undo_stack: Vec<Snapshot>,
    ply: u32,
}

impl GameState {
    /// New game from the standard layout, Black to move
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Player::Black)
    }

    /// Game starting from an arbitrary position with no captures recorded.
    ///
    /// Marbles missing from `board` are not counted as captured, so a sparse
    /// position is playable but its snapshot will not pass `Snapshot::validate`.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        Self {
            board,
            current_player: to_move,
            captured_black: 0,
            captured_white: 0,
            result: GameResult::Ongoing,
            history: Vec::new(),
            undo_stack: Vec::new(),
            ply: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Marbles of `player` pushed off so far
    pub fn captured(&self, player: Player) -> u8 {
        match player {
            Player::Black => self.captured_black,
            Player::White => self.captured_white,
        }
    }

    /// Marbles of `player` still on the board
    pub fn remaining(&self, player: Player) -> usize {
        self.board.count(player)
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_ended(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    pub fn winner(&self) -> Option<Player> {
        self.result.winner()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Speculatively classify a move for the player to move
    pub fn classify(&self, selection: &[Hex], destination: Hex) -> Result<MovePlan, GameError> {
        self.plan(selection, destination).map(|(_, plan)| plan)
    }

    /// Legal destinations for a selection, empty once the game has ended
    pub fn legal_destinations(&self, selection: &[Hex]) -> Result<Vec<MovePlan>, GameError> {
        if self.is_ended() {
            return Ok(Vec::new());
        }
        let group = group::resolve(&self.board, selection, self.current_player)?;
        Ok(moves::legal_destinations(&self.board, &group, self.current_player))
    }

    fn plan(&self, selection: &[Hex], destination: Hex) -> Result<(Group, MovePlan), GameError> {
        if self.is_ended() {
            return Err(GameError::GameOver);
        }
        let group = group::resolve(&self.board, selection, self.current_player)?;
        let plan = moves::classify(&self.board, &group, destination, self.current_player)?;
        Ok((group, plan))
    }

    /// Validate and apply a move for the player to move
    pub fn attempt_move(&mut self, selection: &[Hex], destination: Hex) -> Result<MoveRecord, GameError> {
        let player = self.current_player;
        let (group, plan) = match self.plan(selection, destination) {
            Ok(planned) => planned,
            Err(e) => {
                tracing::debug!("Rejected {} move {:?} -> {}: {}", player, selection, destination, e);
                return Err(e);
            }
        };

        self.undo_stack.push(self.snapshot());
        let record = execute::apply(&mut self.board, player, &group, &plan);
        for capture in &record.captured {
            match capture.player {
                Player::Black => self.captured_black += 1,
                Player::White => self.captured_white += 1,
            }
        }
        self.ply += 1;

        tracing::debug!(
            "Ply {}: {} {:?} {:?} -> {} ({} captured)",
            self.ply,
            player,
            plan.kind,
            record.group,
            destination,
            record.captured.len()
        );

        self.result = self.check_result();
        match self.result.winner() {
            Some(winner) => tracing::info!(
                "Game over after {} plies: {} wins ({}-{})",
                self.ply,
                winner,
                self.captured_white,
                self.captured_black
            ),
            None => self.current_player = player.opponent(),
        }

        self.history.push(record.clone());
        Ok(record)
    }

    /// As `attempt_move`, but only on behalf of `player`
    pub fn attempt_move_as(
        &mut self,
        player: Player,
        selection: &[Hex],
        destination: Hex,
    ) -> Result<MoveRecord, GameError> {
        if self.is_ended() {
            return Err(GameError::GameOver);
        }
        if player != self.current_player {
            return Err(GameError::WrongTurn {
                expected: self.current_player,
                got: player,
            });
        }
        self.attempt_move(selection, destination)
    }

    fn check_result(&self) -> GameResult {
        if self.captured_white >= CAPTURES_TO_WIN {
            GameResult::BlackWins
        } else if self.captured_black >= CAPTURES_TO_WIN {
            GameResult::WhiteWins
        } else {
            GameResult::Ongoing
        }
    }

    /// Back to the standard opening; always permitted
    pub fn reset(&mut self) {
        *self = Self::new();
        tracing::info!("Game reset");
    }

    /// Restore the state from before the last move.
    ///
    /// Finished games cannot be undone; only `reset` leaves the ended state.
    pub fn undo(&mut self) -> Result<MoveRecord, GameError> {
        if self.is_ended() {
            return Err(GameError::GameOver);
        }
        let snapshot = self.undo_stack.pop().ok_or(GameError::NothingToUndo)?;
        let record = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.load(snapshot);
        tracing::debug!("Undid ply {}", self.ply + 1);
        Ok(record)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            current_player: self.current_player,
            captured_black: self.captured_black,
            captured_white: self.captured_white,
            ended: self.is_ended(),
            winner: self.winner(),
            ply: self.ply,
        }
    }

    /// Replace the whole state with `snapshot`, or change nothing if it is inconsistent
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), GameError> {
        snapshot.validate()?;
        self.load(snapshot);
        self.history.clear();
        self.undo_stack.clear();
        tracing::info!("Restored snapshot at ply {}", self.ply);
        Ok(())
    }

    fn load(&mut self, snapshot: Snapshot) {
        self.board = snapshot.board;
        self.current_player = snapshot.current_player;
        self.captured_black = snapshot.captured_black;
        self.captured_white = snapshot.captured_white;
        self.result = match snapshot.winner {
            Some(winner) => GameResult::won_by(winner),
            None => GameResult::Ongoing,
        };
        self.ply = snapshot.ply;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::error::{IllegalMove, SelectionError};
    use crate::moves::MoveKind;

    /// Black pair on the east edge facing a lone white marble, ready to push it off
    fn edge_push_position() -> GameState {
        let board = Board::with_stones(&[Hex::new(2, 0), Hex::new(3, 0)], &[Hex::new(4, 0)]);
        GameState::from_board(board, Player::Black)
    }

    /// Full complement of marbles with white 5 down and black about to push the sixth off
    fn near_win_snapshot() -> Snapshot {
        let mut black = vec![Hex::new(2, 0), Hex::new(3, 0), Hex::new(-2, -2)];
        black.extend((0..=4).map(|r| Hex::new(-4, r)));
        black.extend((-1..=4).map(|r| Hex::new(-3, r)));
        let mut white = vec![Hex::new(4, 0)];
        white.extend((-4..=-1).flat_map(|r| [Hex::new(3, r), Hex::new(4, r)]));

        let mut snapshot = GameState::from_board(Board::with_stones(&black, &white), Player::Black).snapshot();
        snapshot.captured_white = 5;
        snapshot
    }

    #[test]
    fn test_game_creation() {
        let game = GameState::new();
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.result(), GameResult::Ongoing);
        assert_eq!(game.ply(), 0);
        assert_eq!(game.remaining(Player::Black), 14);
        assert_eq!(game.remaining(Player::White), 14);
        assert!(game.last_move().is_none());
    }

    #[test]
    fn test_single_move_passes_turn() {
        let mut game = GameState::new();
        let record = game.attempt_move(&[Hex::new(-2, 0)], Hex::new(-1, 0)).unwrap();
        assert_eq!(record.kind, MoveKind::Single);
        assert_eq!(game.board().get(Hex::new(-1, 0)), Some(Cell::Black));
        assert_eq!(game.board().get(Hex::new(-2, 0)), Some(Cell::Empty));
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.ply(), 1);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut game = GameState::new();
        let before = game.snapshot();

        assert_eq!(
            game.attempt_move(&[Hex::new(2, 0)], Hex::new(1, 0)),
            Err(GameError::InvalidSelection(SelectionError::NotOwned(Hex::new(2, 0))))
        );
        assert_eq!(
            game.attempt_move(&[Hex::new(-2, 0)], Hex::new(0, 0)),
            Err(GameError::InvalidMove(IllegalMove::NotAdjacent))
        );
        assert_eq!(game.snapshot(), before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_wrong_turn() {
        let mut game = GameState::new();
        assert_eq!(
            game.attempt_move_as(Player::White, &[Hex::new(2, 0)], Hex::new(1, 0)),
            Err(GameError::WrongTurn {
                expected: Player::Black,
                got: Player::White
            })
        );
        assert!(game
            .attempt_move_as(Player::Black, &[Hex::new(-2, 0)], Hex::new(-1, 0))
            .is_ok());
    }

    #[test]
    fn test_capture_scores() {
        let mut game = edge_push_position();
        let record = game.attempt_move(&[Hex::new(2, 0), Hex::new(3, 0)], Hex::new(4, 0)).unwrap();
        assert_eq!(record.captured.len(), 1);
        assert_eq!(game.captured(Player::White), 1);
        assert_eq!(game.captured(Player::Black), 0);
        assert!(!game.is_ended());
        assert_eq!(game.current_player(), Player::White);
    }

    #[test]
    fn test_sixth_capture_ends_game() {
        let snapshot = near_win_snapshot();
        assert_eq!(snapshot.board.count(Player::Black), 14);
        assert_eq!(snapshot.board.count(Player::White), 9);
        let mut game = GameState::new();
        game.restore(snapshot).unwrap();

        game.attempt_move(&[Hex::new(2, 0), Hex::new(3, 0)], Hex::new(4, 0)).unwrap();
        assert!(game.is_ended());
        assert_eq!(game.winner(), Some(Player::Black));
        assert_eq!(game.result(), GameResult::BlackWins);
        // turn does not pass once the game is over
        assert_eq!(game.current_player(), Player::Black);

        assert_eq!(
            game.attempt_move(&[Hex::new(3, 0)], Hex::new(2, 0)),
            Err(GameError::GameOver)
        );
        assert_eq!(game.undo(), Err(GameError::GameOver));
        assert!(game.legal_destinations(&[Hex::new(3, 0)]).unwrap().is_empty());

        game.reset();
        assert!(!game.is_ended());
        assert_eq!(game.snapshot(), GameState::new().snapshot());
    }

    #[test]
    fn test_undo_restores_capture() {
        let mut game = edge_push_position();
        let before = game.snapshot();
        game.attempt_move(&[Hex::new(2, 0), Hex::new(3, 0)], Hex::new(4, 0)).unwrap();

        let undone = game.undo().unwrap();
        assert_eq!(undone.captured.len(), 1);
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.board().get(Hex::new(4, 0)), Some(Cell::White));
        assert!(game.history().is_empty());
        assert_eq!(game.undo(), Err(GameError::NothingToUndo));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut game = GameState::new();
        game.attempt_move(&[Hex::new(-2, 0)], Hex::new(-1, 0)).unwrap();
        let snapshot = game.snapshot();

        let mut other = GameState::new();
        other.restore(snapshot.clone()).unwrap();
        assert_eq!(other.snapshot(), snapshot);

        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_restore_rejects_inconsistent_snapshot() {
        let mut game = GameState::new();
        let before = game.snapshot();

        let mut bad = before.clone();
        bad.captured_black = 3; // 14 on board + 3 captured
        assert!(matches!(game.restore(bad), Err(GameError::InvalidSnapshot(_))));

        let mut bad = before.clone();
        bad.ended = true;
        assert!(matches!(game.restore(bad), Err(GameError::InvalidSnapshot(_))));

        // a winner needs six captures
        let mut bad = before.clone();
        bad.ended = true;
        bad.winner = Some(Player::White);
        assert!(matches!(game.restore(bad), Err(GameError::InvalidSnapshot(_))));

        // six captures but still running
        let mut bad = near_win_snapshot();
        bad.board.set(Hex::new(4, 0), Cell::Empty);
        bad.captured_white = 6;
        assert!(matches!(game.restore(bad), Err(GameError::InvalidSnapshot(_))));

        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_restore_rejects_missing_marbles() {
        let mut game = GameState::new();
        let before = game.snapshot();

        // one marble each on the board, none captured: 13 per side unaccounted for
        let sparse = edge_push_position().snapshot();
        assert!(matches!(game.restore(sparse), Err(GameError::InvalidSnapshot(_))));

        // a position with every marble accounted for is accepted
        let mut full = near_win_snapshot();
        full.captured_white = 4;
        assert!(matches!(game.restore(full.clone()), Err(GameError::InvalidSnapshot(_))));
        full.captured_white = 5;
        assert!(game.restore(full).is_ok());
        assert_ne!(game.snapshot(), before);
    }
}

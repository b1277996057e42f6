//! Move execution: relocating marbles and resolving captures

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Direction, Hex};
use crate::game::Player;
use crate::group::Group;
use crate::moves::{MoveKind, MovePlan};

/// A marble pushed off the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub player: Player,
    /// Last on-board position of the marble
    pub hex: Hex,
}

/// An applied move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    /// Group positions before the move, in canonical back-to-front order
    pub group: Vec<Hex>,
    pub kind: MoveKind,
    pub direction: Direction,
    pub destination: Hex,
    pub captured: Vec<Capture>,
}

/// Apply a plan produced by `classify` against this exact board.
pub fn apply(board: &mut Board, player: Player, group: &Group, plan: &MovePlan) -> MoveRecord {
    let captured = match plan.kind {
        MoveKind::Single | MoveKind::Sidestep => {
            shift_all(board, player, group.hexes(), plan.direction);
            Vec::new()
        }
        MoveKind::InlinePush => {
            let captured = push_run(board, group, plan);
            advance_line(board, player, group, plan.direction);
            captured
        }
    };

    MoveRecord {
        player,
        group: group.hexes().to_vec(),
        kind: plan.kind,
        direction: plan.direction,
        destination: plan.destination,
        captured,
    }
}

/// Clear every source before writing any target
fn shift_all(board: &mut Board, player: Player, hexes: &[Hex], direction: Direction) {
    for &hex in hexes {
        board.set(hex, Cell::Empty);
    }
    for &hex in hexes {
        board.set(hex.step(direction), Cell::from(player));
    }
}

/// Move the opposing run one step, farthest marble first
fn push_run(board: &mut Board, group: &Group, plan: &MovePlan) -> Vec<Capture> {
    let lead = leading(group, plan.direction);
    let mut captured = Vec::new();

    for distance in (1..=plan.pushed as i8).rev() {
        let from = lead.offset(plan.direction, distance);
        let Some(owner) = board.get(from).and_then(Cell::owner) else {
            continue;
        };
        let to = from.step(plan.direction);
        if board.exists(to) {
            board.set(to, Cell::from(owner));
        } else {
            captured.push(Capture { player: owner, hex: from });
        }
        board.set(from, Cell::Empty);
    }

    captured
}

/// Move the group itself, leading marble first so none overwrites another
fn advance_line(board: &mut Board, player: Player, group: &Group, direction: Direction) {
    let mut order = group.hexes().to_vec();
    if group.direction() == Some(direction) {
        order.reverse();
    }
    for hex in order {
        board.set(hex.step(direction), Cell::from(player));
        board.set(hex, Cell::Empty);
    }
}

/// Marble at the head of the motion
fn leading(group: &Group, direction: Direction) -> Hex {
    if group.direction() == Some(direction) {
        group.front()
    } else {
        group.back()
    }
}

//! Move classification: what a group does when sent to a destination

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Direction, Hex};
use crate::error::IllegalMove;
use crate::game::Player;
use crate::group::Group;

/// Shape of a legal move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// One marble steps to an adjacent empty cell
    Single,
    /// A line moves along itself toward either end, pushing when opponents are ahead
    InlinePush,
    /// A line moves broadside, every marble by the same step
    Sidestep,
}

/// A classified legal move, ready for execution on the board it was checked against
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    pub kind: MoveKind,
    /// Direction every moving marble travels
    pub direction: Direction,
    pub destination: Hex,
    /// Opposing marbles directly ahead that get pushed
    pub pushed: u8,
}

/// Classify sending `group` to `destination` for `player`. Never mutates.
pub fn classify(
    board: &Board,
    group: &Group,
    destination: Hex,
    player: Player,
) -> Result<MovePlan, IllegalMove> {
    if !board.exists(destination) {
        return Err(IllegalMove::OffBoard(destination));
    }

    let Some(line) = group.direction() else {
        return classify_single(board, group.back(), destination);
    };

    // An inline move is led by whichever end faces the destination
    if destination == group.front().step(line) {
        classify_inline(board, group, line, destination, player)
    } else if destination == group.back().step(line.opposite()) {
        classify_inline(board, group, line.opposite(), destination, player)
    } else {
        classify_sidestep(board, group, line, destination)
    }
}

/// Every legal destination for `group`, in board order
pub fn legal_destinations(board: &Board, group: &Group, player: Player) -> Vec<MovePlan> {
    board
        .all_coordinates()
        .iter()
        .filter_map(|&hex| classify(board, group, hex, player).ok())
        .collect()
}

fn classify_single(board: &Board, from: Hex, destination: Hex) -> Result<MovePlan, IllegalMove> {
    let direction = Direction::between(from, destination).ok_or(IllegalMove::NotAdjacent)?;
    ensure_empty(board, destination)?;
    Ok(MovePlan {
        kind: MoveKind::Single,
        direction,
        destination,
        pushed: 0,
    })
}

fn classify_inline(
    board: &Board,
    group: &Group,
    motion: Direction,
    destination: Hex,
    player: Player,
) -> Result<MovePlan, IllegalMove> {
    let run = opponent_run(board, destination, motion, player)?;
    let size = group.len() as u8;
    // Pushing needs strict numerical superiority
    if run > 0 && run >= size {
        return Err(IllegalMove::Outnumbered { group: size, run });
    }
    Ok(MovePlan {
        kind: MoveKind::InlinePush,
        direction: motion,
        destination,
        pushed: run,
    })
}

fn classify_sidestep(
    board: &Board,
    group: &Group,
    line: Direction,
    destination: Hex,
) -> Result<MovePlan, IllegalMove> {
    let direction = Direction::between(group.back(), destination).ok_or(IllegalMove::NotAdjacent)?;
    if direction.is_parallel(line) {
        return Err(IllegalMove::NotPerpendicular);
    }
    for hex in group.hexes() {
        ensure_empty(board, hex.step(direction))?;
    }
    Ok(MovePlan {
        kind: MoveKind::Sidestep,
        direction,
        destination,
        pushed: 0,
    })
}

/// Count opposing marbles from `start` along `direction` up to the first
/// empty cell or the board edge
fn opponent_run(
    board: &Board,
    start: Hex,
    direction: Direction,
    player: Player,
) -> Result<u8, IllegalMove> {
    let mut run = 0;
    let mut cursor = start;
    while let Some(cell) = board.get(cursor) {
        match cell.owner() {
            None => break,
            Some(owner) if owner == player => return Err(IllegalMove::BlockedByOwn(cursor)),
            Some(_) => run += 1,
        }
        cursor = cursor.step(direction);
    }
    Ok(run)
}

fn ensure_empty(board: &Board, hex: Hex) -> Result<(), IllegalMove> {
    match board.get(hex) {
        Some(Cell::Empty) => Ok(()),
        Some(_) => Err(IllegalMove::Occupied(hex)),
        None => Err(IllegalMove::OffBoard(hex)),
    }
}

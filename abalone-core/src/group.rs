//! Resolution of a selection into a group of marbles that move together

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Direction, Hex};
use crate::error::SelectionError;
use crate::game::Player;

/// Largest number of marbles that move as one unit
pub const MAX_GROUP_SIZE: usize = 3;

/// One to three marbles in a straight line, ordered back to front.
///
/// The order is canonical: hexes are sorted by `(q, r)`, so the line
/// direction is always SouthEast, South or NorthEast and does not depend on
/// the order in which the marbles were selected. It is `None` for a single
/// marble.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    hexes: Vec<Hex>,
    direction: Option<Direction>,
}

impl Group {
    pub fn hexes(&self) -> &[Hex] {
        &self.hexes
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn back(&self) -> Hex {
        self.hexes[0]
    }

    pub fn front(&self) -> Hex {
        self.hexes[self.hexes.len() - 1]
    }
}

/// Validate a selection for `player`. Selection order is irrelevant.
pub fn resolve(board: &Board, selection: &[Hex], player: Player) -> Result<Group, SelectionError> {
    if selection.is_empty() {
        return Err(SelectionError::Empty);
    }
    if selection.len() > MAX_GROUP_SIZE {
        return Err(SelectionError::TooMany(selection.len()));
    }

    let own = Cell::from(player);
    for (i, &hex) in selection.iter().enumerate() {
        match board.get(hex) {
            None => return Err(SelectionError::OffBoard(hex)),
            _ if selection[..i].contains(&hex) => return Err(SelectionError::Duplicate(hex)),
            Some(cell) if cell != own => return Err(SelectionError::NotOwned(hex)),
            Some(_) => {}
        }
    }

    let mut hexes = selection.to_vec();
    hexes.sort();

    let direction = match *hexes.as_slice() {
        [_] => None,
        [a, b] => Some(Direction::between(a, b).ok_or(SelectionError::NotAdjacent)?),
        [a, b, c] => {
            // sorted order is monotone along any line
            let direction = Direction::between(a, b).ok_or(SelectionError::NotInLine)?;
            if b.step(direction) != c {
                return Err(SelectionError::NotInLine);
            }
            Some(direction)
        }
        _ => return Err(SelectionError::TooMany(hexes.len())),
    };

    Ok(Group { hexes, direction })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_board() -> Board {
        Board::with_stones(
            &[Hex::new(-1, 0), Hex::new(0, 0), Hex::new(1, 0), Hex::new(0, 1)],
            &[Hex::new(2, 0)],
        )
    }

    #[test]
    fn test_single() {
        let group = resolve(&row_board(), &[Hex::new(0, 0)], Player::Black).unwrap();
        assert_eq!(group.hexes(), &[Hex::new(0, 0)]);
        assert_eq!(group.direction(), None);
        assert_eq!(group.back(), group.front());
    }

    #[test]
    fn test_pair_ignores_selection_order() {
        let board = row_board();
        let forward = resolve(&board, &[Hex::new(-1, 0), Hex::new(0, 0)], Player::Black).unwrap();
        let reversed = resolve(&board, &[Hex::new(0, 0), Hex::new(-1, 0)], Player::Black).unwrap();

        assert_eq!(forward, reversed);
        assert_eq!(forward.direction(), Some(Direction::SouthEast));
        assert_eq!(forward.back(), Hex::new(-1, 0));
        assert_eq!(forward.front(), Hex::new(0, 0));
    }

    #[test]
    fn test_triple_any_order() {
        let board = row_board();
        let (a, b, c) = (Hex::new(-1, 0), Hex::new(0, 0), Hex::new(1, 0));

        for selection in [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]] {
            let group = resolve(&board, &selection, Player::Black).unwrap();
            assert_eq!(group.hexes(), &[a, b, c], "{selection:?}");
            assert_eq!(group.direction(), Some(Direction::SouthEast));
        }
    }

    #[test]
    fn test_canonical_directions() {
        let board = Board::with_stones(&[Hex::new(0, 0), Hex::new(0, 1), Hex::new(-1, 1), Hex::new(1, -1)], &[]);

        let south = resolve(&board, &[Hex::new(0, 1), Hex::new(0, 0)], Player::Black).unwrap();
        assert_eq!(south.direction(), Some(Direction::South));
        assert_eq!(south.back(), Hex::new(0, 0));

        // a south-west pair is stored as its north-east reading
        let diagonal = resolve(&board, &[Hex::new(0, 0), Hex::new(-1, 1)], Player::Black).unwrap();
        assert_eq!(diagonal.direction(), Some(Direction::NorthEast));
        assert_eq!(diagonal.hexes(), &[Hex::new(-1, 1), Hex::new(0, 0)]);

        let line = resolve(&board, &[Hex::new(1, -1), Hex::new(-1, 1), Hex::new(0, 0)], Player::Black).unwrap();
        assert_eq!(line.hexes(), &[Hex::new(-1, 1), Hex::new(0, 0), Hex::new(1, -1)]);
    }

    #[test]
    fn test_rejections() {
        let board = row_board();
        let black = Player::Black;

        assert_eq!(resolve(&board, &[], black), Err(SelectionError::Empty));
        assert_eq!(
            resolve(&board, &[Hex::new(-1, 0), Hex::new(0, 0), Hex::new(1, 0), Hex::new(0, 1)], black),
            Err(SelectionError::TooMany(4))
        );
        assert_eq!(
            resolve(&board, &[Hex::new(9, 0)], black),
            Err(SelectionError::OffBoard(Hex::new(9, 0)))
        );
        assert_eq!(
            resolve(&board, &[Hex::new(0, 0), Hex::new(0, 0)], black),
            Err(SelectionError::Duplicate(Hex::new(0, 0)))
        );
        assert_eq!(
            resolve(&board, &[Hex::new(2, 0)], black),
            Err(SelectionError::NotOwned(Hex::new(2, 0)))
        );
        assert_eq!(
            resolve(&board, &[Hex::new(-1, 0), Hex::new(1, 0)], black),
            Err(SelectionError::NotAdjacent)
        );
        // bent line
        assert_eq!(
            resolve(&board, &[Hex::new(-1, 0), Hex::new(0, 0), Hex::new(0, 1)], black),
            Err(SelectionError::NotInLine)
        );
        assert_eq!(
            resolve(&board, &[Hex::new(0, 0)], Player::White),
            Err(SelectionError::NotOwned(Hex::new(0, 0)))
        );
    }
}

//! Hex board geometry with axial coordinates

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::game::Player;

/// Board radius (distance from center to edge)
pub const BOARD_RADIUS: i8 = 4;

/// Number of cells on a radius-4 hexagon
pub const CELL_COUNT: usize = 61;

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
}

impl Hex {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Check if this hex is on the board
    pub const fn is_valid(&self) -> bool {
        // Widened so that i8 extremes cannot overflow in q + r
        let q = self.q as i16;
        let r = self.r as i16;
        let radius = BOARD_RADIUS as i16;
        q.abs() <= radius && r.abs() <= radius && (q + r).abs() <= radius
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Hex) -> i16 {
        let dq = self.q as i16 - other.q as i16;
        let dr = self.r as i16 - other.r as i16;
        (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
    }

    /// True when the two hexes share an edge
    pub fn is_adjacent(&self, other: Hex) -> bool {
        self.distance_to(other) == 1
    }

    /// Neighbor one step away in `direction`
    pub fn step(&self, direction: Direction) -> Hex {
        self.offset(direction, 1)
    }

    /// Hex `distance` steps away in `direction`
    pub fn offset(&self, direction: Direction, distance: i8) -> Hex {
        let (dq, dr) = direction.vector();
        Hex::new(
            self.q.saturating_add(dq.saturating_mul(distance)),
            self.r.saturating_add(dr.saturating_mul(distance)),
        )
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// The six unit directions of the axial grid.
///
/// Names assume a flat-top layout with screen y growing downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    SouthEast,
    South,
    SouthWest,
    NorthWest,
    North,
    NorthEast,
}

impl Direction {
    /// All directions; index `i` and `i + 3` are opposite
    pub const ALL: [Direction; 6] = [
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
    ];

    /// Axial vector (dq, dr)
    pub const fn vector(self) -> (i8, i8) {
        match self {
            Direction::SouthEast => (1, 0),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::NorthWest => (-1, 0),
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
        }
    }

    /// Short compass name
    pub const fn name(self) -> &'static str {
        match self {
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::NorthWest => "NW",
            Direction::North => "N",
            Direction::NorthEast => "NE",
        }
    }

    pub fn opposite(self) -> Direction {
        Self::ALL[(self as usize + 3) % 6]
    }

    /// Direction with the given axial vector, if it is a unit vector
    pub fn from_vector(dq: i8, dr: i8) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| d.vector() == (dq, dr))
    }

    /// Unit direction leading from `from` to the adjacent hex `to`
    pub fn between(from: Hex, to: Hex) -> Option<Direction> {
        let dq = to.q as i16 - from.q as i16;
        let dr = to.r as i16 - from.r as i16;
        let dq = i8::try_from(dq).ok()?;
        let dr = i8::try_from(dr).ok()?;
        Self::from_vector(dq, dr)
    }

    /// True when both directions lie on the same line
    pub fn is_parallel(self, other: Direction) -> bool {
        self == other || self == other.opposite()
    }
}

/// Every on-board hex, q ascending then r ascending
pub const ALL_HEXES: [Hex; CELL_COUNT] = build_all_hexes();

const fn build_all_hexes() -> [Hex; CELL_COUNT] {
    let mut hexes = [Hex::new(0, 0); CELL_COUNT];
    let mut index = 0;
    let mut q = -BOARD_RADIUS;
    while q <= BOARD_RADIUS {
        let mut r = -BOARD_RADIUS;
        while r <= BOARD_RADIUS {
            let hex = Hex::new(q, r);
            if hex.is_valid() {
                hexes[index] = hex;
                index += 1;
            }
            r += 1;
        }
        q += 1;
    }
    hexes
}

/// Black starting wedge along the q = -4 edge
pub const BLACK_START: [Hex; 14] = [
    Hex::new(-4, 0),
    Hex::new(-4, 1),
    Hex::new(-4, 2),
    Hex::new(-4, 3),
    Hex::new(-4, 4),
    Hex::new(-3, -1),
    Hex::new(-3, 0),
    Hex::new(-3, 1),
    Hex::new(-3, 2),
    Hex::new(-3, 3),
    Hex::new(-3, 4),
    Hex::new(-2, -2),
    Hex::new(-2, -1),
    Hex::new(-2, 0),
];

/// White starting wedge along the q = 4 edge
pub const WHITE_START: [Hex; 14] = [
    Hex::new(2, 0),
    Hex::new(2, 1),
    Hex::new(2, 2),
    Hex::new(3, -4),
    Hex::new(3, -3),
    Hex::new(3, -2),
    Hex::new(3, -1),
    Hex::new(3, 0),
    Hex::new(3, 1),
    Hex::new(4, -4),
    Hex::new(4, -3),
    Hex::new(4, -2),
    Hex::new(4, -1),
    Hex::new(4, 0),
];

/// Contents of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// An occupied cell, the wire form of a board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stone {
    pub hex: Hex,
    pub player: Player,
}

/// Occupancy of all 61 cells.
///
/// The key set is fixed at construction; `set` can only overwrite, so an
/// off-board coordinate is never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Stone>", into = "Vec<Stone>")]
pub struct Board {
    cells: FxHashMap<Hex, Cell>,
}

impl Board {
    /// Board with every cell empty
    pub fn empty() -> Self {
        Self {
            cells: ALL_HEXES.iter().map(|&hex| (hex, Cell::Empty)).collect(),
        }
    }

    /// Standard opening layout
    pub fn standard() -> Self {
        Self::with_stones(&BLACK_START, &WHITE_START)
    }

    /// Board holding exactly the given marbles. Every hex must be on the board.
    pub fn with_stones(black: &[Hex], white: &[Hex]) -> Self {
        let mut board = Self::empty();
        for &hex in black {
            debug_assert!(hex.is_valid(), "black marble placed off the board at {hex}");
            board.set(hex, Cell::Black);
        }
        for &hex in white {
            debug_assert!(hex.is_valid(), "white marble placed off the board at {hex}");
            board.set(hex, Cell::White);
        }
        board
    }

    pub fn exists(&self, hex: Hex) -> bool {
        self.cells.contains_key(&hex)
    }

    /// Cell contents, `None` when the hex is off the board
    pub fn get(&self, hex: Hex) -> Option<Cell> {
        self.cells.get(&hex).copied()
    }

    /// Overwrite a cell; writes to off-board hexes are dropped
    pub fn set(&mut self, hex: Hex, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(&hex) {
            *slot = cell;
        }
    }

    pub fn all_coordinates(&self) -> &'static [Hex; CELL_COUNT] {
        &ALL_HEXES
    }

    /// Marbles of `player` still on the board
    pub fn count(&self, player: Player) -> usize {
        let cell = Cell::from(player);
        self.cells.values().filter(|&&c| c == cell).count()
    }

    /// Occupied cells in `ALL_HEXES` order
    pub fn stones(&self) -> Vec<Stone> {
        ALL_HEXES
            .iter()
            .filter_map(|&hex| {
                let player = self.get(hex)?.owner()?;
                Some(Stone { hex, player })
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<Stone>> for Board {
    type Error = BoardError;

    fn try_from(stones: Vec<Stone>) -> Result<Self, Self::Error> {
        let mut board = Board::empty();
        for stone in stones {
            match board.get(stone.hex) {
                None => return Err(BoardError::OffBoard(stone.hex)),
                Some(Cell::Empty) => board.set(stone.hex, stone.player.into()),
                Some(_) => return Err(BoardError::Duplicate(stone.hex)),
            }
        }
        Ok(board)
    }
}

impl From<Board> for Vec<Stone> {
    fn from(board: Board) -> Self {
        board.stones()
    }
}

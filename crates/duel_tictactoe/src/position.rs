//! Board coordinates, cursor directions and the eight winning lines.

use crate::BOARD_SIZE;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A cell coordinate; `row` and `col` are always in `0..3`.
///
/// Serializes as a `(row, col)` pair; deserialization goes through
/// [`Coord::new`], so an off-board pair is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[display("({row}, {col})")]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Coord {
    row: usize,
    col: usize,
}

/// A `(row, col)` pair that does not name a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Coordinate ({row}, {col}) is off the board")]
pub struct CoordOutOfRange {
    /// Requested row.
    pub row: usize,
    /// Requested column.
    pub col: usize,
}

impl TryFrom<(usize, usize)> for Coord {
    type Error = CoordOutOfRange;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Coord::new(row, col).ok_or(CoordOutOfRange { row, col })
    }
}

impl From<Coord> for (usize, usize) {
    fn from(at: Coord) -> Self {
        (at.row, at.col)
    }
}

/// Direction the cursor can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards row 2.
    Down,
    /// Towards column 0.
    Left,
    /// Towards column 2.
    Right,
}

impl Coord {
    /// Top-left corner, where a fresh cursor starts.
    pub const ORIGIN: Coord = Coord::at(0, 0);

    /// The middle cell.
    pub const CENTER: Coord = Coord::at(1, 1);

    /// All nine coordinates in row-major order.
    pub const ALL: [Coord; 9] = [
        Coord::at(0, 0),
        Coord::at(0, 1),
        Coord::at(0, 2),
        Coord::at(1, 0),
        Coord::at(1, 1),
        Coord::at(1, 2),
        Coord::at(2, 0),
        Coord::at(2, 1),
        Coord::at(2, 2),
    ];

    /// Creates a coordinate, or `None` when either part is off the board.
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row index, top to bottom.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column index, left to right.
    pub fn col(self) -> usize {
        self.col
    }

    /// Moves one cell in `direction`, staying put at the board edge.
    pub fn step(self, direction: Direction) -> Self {
        let last = BOARD_SIZE - 1;
        match direction {
            Direction::Up => Self::at(self.row.saturating_sub(1), self.col),
            Direction::Down => Self::at((self.row + 1).min(last), self.col),
            Direction::Left => Self::at(self.row, self.col.saturating_sub(1)),
            Direction::Right => Self::at(self.row, (self.col + 1).min(last)),
        }
    }
}

/// Three coordinates forming a row, column or diagonal.
pub type Line = [Coord; 3];

/// Every winning line in scan order: rows top to bottom, columns left to
/// right, then the two diagonals (top-left first).
pub const LINES: [Line; 8] = [
    // Rows
    [Coord::at(0, 0), Coord::at(0, 1), Coord::at(0, 2)],
    [Coord::at(1, 0), Coord::at(1, 1), Coord::at(1, 2)],
    [Coord::at(2, 0), Coord::at(2, 1), Coord::at(2, 2)],
    // Columns
    [Coord::at(0, 0), Coord::at(1, 0), Coord::at(2, 0)],
    [Coord::at(0, 1), Coord::at(1, 1), Coord::at(2, 1)],
    [Coord::at(0, 2), Coord::at(1, 2), Coord::at(2, 2)],
    // Diagonals
    [Coord::at(0, 0), Coord::at(1, 1), Coord::at(2, 2)],
    [Coord::at(0, 2), Coord::at(1, 1), Coord::at(2, 0)],
];

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Coord::new(2, 2), Some(Coord::at(2, 2)));
        assert_eq!(Coord::new(3, 0), None);
        assert_eq!(Coord::new(0, 3), None);
    }

    #[test]
    fn test_step_clamps_at_edges() {
        for direction in [Direction::Up, Direction::Left] {
            assert_eq!(Coord::ORIGIN.step(direction), Coord::ORIGIN);
        }
        let corner = Coord::at(2, 2);
        for direction in [Direction::Down, Direction::Right] {
            assert_eq!(corner.step(direction), corner);
        }
    }

    #[test]
    fn test_step_from_center_reaches_neighbours() {
        let reached: Vec<_> = Direction::iter().map(|d| Coord::CENTER.step(d)).collect();
        assert_eq!(
            reached,
            vec![
                Coord::at(0, 1),
                Coord::at(2, 1),
                Coord::at(1, 0),
                Coord::at(1, 2)
            ]
        );
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Placement {
        at: Coord,
    }

    #[test]
    fn test_deserialize_rejects_off_board_pair() {
        let err = toml::from_str::<Placement>("at = [7, 0]\n").unwrap_err();
        assert!(err.to_string().contains("Coordinate (7, 0) is off the board"), "{err}");
        assert!(toml::from_str::<Placement>("at = [0, 3]\n").is_err());
    }

    #[test]
    fn test_serde_keeps_valid_pairs() {
        let placed: Placement = toml::from_str("at = [2, 1]\n").unwrap();
        assert_eq!(placed.at, Coord::at(2, 1));
        let text = toml::to_string(&placed).unwrap();
        let again: Placement = toml::from_str(&text).unwrap();
        assert_eq!(again.at, placed.at);
    }

    #[test]
    fn test_display() {
        assert_eq!(Coord::at(1, 2).to_string(), "(1, 2)");
    }
}

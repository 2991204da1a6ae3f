//! Core domain types for tic-tac-toe.

use crate::position::Coord;
use crate::BOARD_SIZE;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the two identities a participant plays as.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum Role {
    /// Moves first, plays `X`.
    #[strum(to_string = "X")]
    First,
    /// Moves second, plays `O`.
    #[strum(to_string = "O")]
    Second,
}

impl Role {
    /// Returns the other role.
    pub fn opponent(self) -> Self {
        match self {
            Role::First => Role::Second,
            Role::Second => Role::First,
        }
    }

    /// The mark drawn on the board for this role.
    pub fn symbol(self) -> char {
        match self {
            Role::First => 'X',
            Role::Second => 'O',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell claimed by a role.
    Mark(Role),
}

impl Cell {
    /// Returns the role holding this cell, if any.
    pub fn role(self) -> Option<Role> {
        match self {
            Cell::Empty => None,
            Cell::Mark(role) => Some(role),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cell at the given coordinate.
    pub fn get(&self, at: Coord) -> Cell {
        self.cells[at.row()][at.col()]
    }

    /// Sets the cell at the given coordinate.
    pub fn set(&mut self, at: Coord, cell: Cell) {
        self.cells[at.row()][at.col()] = cell;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, at: Coord) -> bool {
        self.get(at) == Cell::Empty
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells = Default::default();
    }

    /// Formats the board as three lines of `X`, `O` and `.`.
    pub fn display(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.role().map_or('.', Role::symbol))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Failure to parse a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// A character other than `X`, `O`, `.` or whitespace was found.
    #[display("Unexpected board character {:?}", _0)]
    UnexpectedChar(#[error(not(source))] char),
    /// The text did not hold exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongCellCount(#[error(not(source))] usize),
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses the format produced by [`Board::display`]; whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                'X' | 'x' => Ok(Cell::Mark(Role::First)),
                'O' | 'o' => Ok(Cell::Mark(Role::Second)),
                '.' => Ok(Cell::Empty),
                other => Err(BoardParseError::UnexpectedChar(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if cells.len() != BOARD_SIZE * BOARD_SIZE {
            return Err(BoardParseError::WrongCellCount(cells.len()));
        }

        let mut board = Board::new();
        for (at, cell) in Coord::ALL.iter().zip(cells) {
            board.set(*at, cell);
        }
        Ok(board)
    }
}

/// Terminal classification of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Still being played.
    #[default]
    Undecided,
    /// A role completed a line.
    Won(Role),
    /// Board filled with no line.
    Drawn,
}

impl Outcome {
    /// True once the game is won or drawn.
    pub fn is_decided(self) -> bool {
        self != Outcome::Undecided
    }

    /// The winning role, if any.
    pub fn winner(self) -> Option<Role> {
        match self {
            Outcome::Won(role) => Some(role),
            _ => None,
        }
    }
}

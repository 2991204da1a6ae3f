//! Pure tic-tac-toe game logic.
//!
//! This crate knows nothing about sessions, terminals or networks. It
//! provides the board, the two roles, the eight winning lines in their fixed
//! scan order, and a small [`Game`] state machine that validates placements
//! and evaluates the outcome after each one.
//!
//! # Example
//!
//! ```
//! use duel_tictactoe::{Coord, Game, Outcome, Role};
//!
//! let mut game = Game::new();
//! let outcome = game.place(Role::First, Coord::CENTER).unwrap();
//! assert_eq!(outcome, Outcome::Undecided);
//! assert_eq!(game.turn(), Role::Second);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod position;
pub mod rules;
mod types;

pub use game::{Game, PlaceRejection};
pub use position::{Coord, CoordOutOfRange, Direction, Line, LINES};
pub use rules::{evaluate_outcome, is_full};
pub use types::{Board, BoardParseError, Cell, Outcome, Role};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

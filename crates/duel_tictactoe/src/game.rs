//! Game logic and rules for tic-tac-toe.

use crate::position::{Coord, Line};
use crate::rules::{evaluate_outcome, is_full};
use crate::types::{Board, Cell, Outcome, Role};
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// Why a placement was refused.
///
/// Rejections are not faults: the caller drops the intent and nothing
/// about the game changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceRejection {
    /// The game is already won or drawn.
    #[display("Game is already over")]
    OutcomeAlreadyDecided,

    /// The role asking to move does not hold the turn.
    #[display("Not your turn")]
    NotYourTurn,

    /// Someone already played on that cell.
    #[display("Cell is already occupied")]
    CellOccupied,
}

/// Tic-tac-toe game engine: board, turn, outcome and winning line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Role,
    outcome: Outcome,
    winning_line: Option<Line>,
}

impl Game {
    /// Creates a new game with an empty board and `First` to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Role::First,
            outcome: Outcome::Undecided,
            winning_line: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Role that moves next. Meaningless once the outcome is decided.
    pub fn turn(&self) -> Role {
        self.turn
    }

    /// Returns the outcome so far.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The completed line, present only when the outcome is `Won`.
    pub fn winning_line(&self) -> Option<Line> {
        self.winning_line
    }

    /// Places `role`'s mark at `at`.
    ///
    /// Checks run in order: decided outcome, turn ownership, cell occupancy.
    /// On success the mark is written, the outcome is evaluated for `role`
    /// and, if the game continues, the turn passes to the opponent.
    ///
    /// # Errors
    ///
    /// Returns a [`PlaceRejection`] and leaves the game untouched when the
    /// placement is illegal.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn place(&mut self, role: Role, at: Coord) -> Result<Outcome, PlaceRejection> {
        if self.outcome.is_decided() {
            return Err(PlaceRejection::OutcomeAlreadyDecided);
        }
        if role != self.turn {
            return Err(PlaceRejection::NotYourTurn);
        }
        if !self.board.is_empty(at) {
            return Err(PlaceRejection::CellOccupied);
        }

        self.board.set(at, Cell::Mark(role));

        if let Some(line) = evaluate_outcome(&self.board, role) {
            self.outcome = Outcome::Won(role);
            self.winning_line = Some(line);
        } else if is_full(&self.board) {
            self.outcome = Outcome::Drawn;
        } else {
            self.turn = role.opponent();
        }

        debug!(outcome = ?self.outcome, "Placement applied");
        Ok(self.outcome)
    }

    /// Puts the game back to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

//! Win detection logic for tic-tac-toe.

use crate::position::{Line, LINES};
use crate::types::{Board, Cell, Role};
use tracing::instrument;

/// Checks whether `role` holds three in a row.
///
/// Returns the first completed line in scan order (rows, then columns, then
/// the two diagonals), so a placement that completes two lines at once
/// always reports the same one.
#[instrument(skip(board))]
pub fn evaluate_outcome(board: &Board, role: Role) -> Option<Line> {
    LINES
        .into_iter()
        .find(|line| line.iter().all(|at| board.get(*at) == Cell::Mark(role)))
}

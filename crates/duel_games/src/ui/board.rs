//! Tic-tac-toe board rendering.

use super::theme;
use duel_tictactoe::{Board, Cell, Coord, Line as WinLine, Role};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

/// Which decorations to draw on top of the marks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Highlights {
    /// Cell under the player's cursor.
    pub cursor: Option<Coord>,
    /// Completed line to highlight.
    pub winning_line: Option<WinLine>,
}

/// Renders the board as three lines of `[X][O][ ]` cells.
pub fn board_lines(board: &Board, highlights: Highlights) -> Vec<Line<'static>> {
    board
        .rows()
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(|(col, cell)| {
                    let at = Coord::new(row, col)?;
                    Some(Span::styled(cell_text(*cell), cell_style(at, *cell, highlights)))
                })
                .collect::<Line>()
        })
        .collect()
}

fn cell_text(cell: Cell) -> String {
    format!("[{}]", cell.role().map_or(' ', Role::symbol))
}

/// Cursor beats winning line, which beats the plain mark colour.
fn cell_style(at: Coord, cell: Cell, highlights: Highlights) -> Style {
    if highlights.cursor == Some(at) {
        let style = theme::cursor();
        return match cell.role() {
            Some(role) => style.fg(theme::role_color(role)),
            None => style,
        };
    }
    if highlights
        .winning_line
        .is_some_and(|line| line.contains(&at))
    {
        return theme::win();
    }
    match cell.role() {
        Some(role) => Style::default().fg(theme::role_color(role)),
        None => theme::empty_cell(),
    }
}

//! Colours and styles shared by the screens.

use duel_tictactoe::Role;
use ratatui::style::{Color, Modifier, Style};

const GREEN: Color = Color::Rgb(0x50, 0xfa, 0x7b);
const CYAN: Color = Color::Rgb(0x8b, 0xe9, 0xfd);
const PINK: Color = Color::Rgb(0xff, 0x79, 0xc6);
const YELLOW: Color = Color::Rgb(0xf1, 0xfa, 0x8c);
const COMMENT: Color = Color::Rgb(0x62, 0x72, 0xa4);
const PURPLE: Color = Color::Rgb(0xbd, 0x93, 0xf9);
const RED: Color = Color::Rgb(0xff, 0x55, 0x55);
const ORANGE: Color = Color::Rgb(0xff, 0xb8, 0x6c);
const SELECTION: Color = Color::Rgb(0x44, 0x47, 0x5a);
const FOREGROUND: Color = Color::Rgb(0xf8, 0xf8, 0xf2);

/// Mark colour for a role.
pub fn role_color(role: Role) -> Color {
    match role {
        Role::First => CYAN,
        Role::Second => PINK,
    }
}

/// Plain mark in its role colour.
pub fn role(role: Role) -> Style {
    Style::default().fg(role_color(role))
}

/// Cells of the winning line.
pub fn win() -> Style {
    Style::default().fg(GREEN).add_modifier(Modifier::BOLD)
}

/// Cell under the cursor.
pub fn cursor() -> Style {
    Style::default()
        .bg(SELECTION)
        .fg(FOREGROUND)
        .add_modifier(Modifier::BOLD)
}

/// Unplayed cell.
pub fn empty_cell() -> Style {
    Style::default().fg(PURPLE)
}

/// Title and draw banner.
pub fn header() -> Style {
    Style::default().fg(YELLOW).add_modifier(Modifier::BOLD)
}

/// Help and turn labels.
pub fn footer() -> Style {
    Style::default().fg(COMMENT).add_modifier(Modifier::BOLD)
}

/// Disconnect warning.
pub fn warning() -> Style {
    Style::default().fg(RED).add_modifier(Modifier::BOLD)
}

/// Waiting-for-opponent notice.
pub fn waiting() -> Style {
    Style::default().fg(ORANGE).add_modifier(Modifier::BOLD)
}

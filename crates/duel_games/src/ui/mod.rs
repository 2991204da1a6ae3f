//! Stateless UI rendering of a [`PlayerView`].

mod banner;
mod board;
mod theme;

use crate::view::{PlayerView, Seat};
use board::{board_lines, Highlights};
use duel_tictactoe::{Outcome, Role};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

pub use banner::banner;

const HELP: &str = "Press r to restart, q to quit";

/// Draws the game screen, or the end-of-game screen once decided.
pub fn draw(frame: &mut Frame, view: &PlayerView) {
    let area = frame.area();
    match view.outcome() {
        Outcome::Undecided => draw_game(frame, area, view),
        decided => draw_result(frame, area, view, decided),
    }
}

fn draw_game(frame: &mut Frame, area: Rect, view: &PlayerView) {
    let [title, board, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Min(4),
    ])
    .areas(area);

    let header = Paragraph::new(Line::styled("T I C - T A C - T O E", theme::header()))
        .alignment(Alignment::Center);
    frame.render_widget(header, title);

    let highlights = Highlights {
        cursor: Some(view.cursor()),
        winning_line: view.winning_line(),
    };
    let grid = Paragraph::new(Text::from(board_lines(view.board(), highlights)))
        .alignment(Alignment::Center);
    frame.render_widget(grid, board);

    let status = Paragraph::new(Text::from(vec![
        status_line(view),
        Line::default(),
        Line::styled(HELP, theme::footer()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(status, footer);
}

fn draw_result(frame: &mut Frame, area: Rect, view: &PlayerView, outcome: Outcome) {
    let (text, style, help) = match outcome {
        Outcome::Won(role) => (
            format!("{} WINS!", role.symbol()),
            theme::role(role),
            HELP.to_string(),
        ),
        _ => (
            "DRAW".to_string(),
            theme::header(),
            format!("It's a draw! {HELP}"),
        ),
    };

    let mut lines: Vec<Line> = vec![Line::default(); 2];
    lines.extend(banner(&text).into_iter().map(|row| Line::styled(row, style)));
    lines.push(Line::default());
    lines.extend(board_lines(
        view.board(),
        Highlights {
            cursor: None,
            winning_line: view.winning_line(),
        },
    ));
    lines.push(Line::default());
    if view.opponent_disconnected() && matches!(view.seat(), Seat::Remote(_)) {
        lines.push(disconnect_line(view));
    }
    lines.push(Line::styled(help, theme::footer()));

    frame.render_widget(
        Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
        area,
    );
}

fn disconnect_line(view: &PlayerView) -> Line<'static> {
    Line::styled(
        format!(
            "Opponent disconnected! Game will end in {} seconds...",
            view.grace().as_secs()
        ),
        theme::warning(),
    )
}

fn status_line(view: &PlayerView) -> Line<'static> {
    let turn = view.turn();
    match view.seat() {
        Seat::Remote(_) if view.opponent_disconnected() => disconnect_line(view),
        Seat::Remote(_) if view.waiting_for_opponent() => {
            Line::styled("Waiting for another player to join...", theme::waiting())
        }
        Seat::Remote(_) if view.is_my_turn() => turn_line("Your turn: ", turn),
        Seat::Remote(_) => turn_line("Opponent's turn: ", turn),
        Seat::Local => turn_line("Turn: ", turn),
    }
}

fn turn_line(label: &'static str, turn: Role) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, theme::footer()),
        Span::styled(turn.to_string(), theme::role(turn)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchmaker::Matchmaker;
    use crate::session::GameSession;
    use duel_tictactoe::Coord;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    const GRACE: Duration = Duration::from_secs(5);

    fn render(view: &PlayerView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, view)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_waiting_footer_for_lone_player() {
        let matchmaker = Matchmaker::new();
        let pairing = matchmaker.pair();
        let view = PlayerView::new(pairing.session().clone(), Seat::Remote(Role::First), GRACE);
        let screen = render(&view);
        assert!(screen.contains("Waiting for another player to join..."));
        assert!(screen.contains(HELP));
        assert!(screen.contains("[ ][ ][ ]"));
    }

    #[test]
    fn test_turn_footers() {
        let matchmaker = Matchmaker::new();
        let a = matchmaker.pair();
        let b = matchmaker.pair();
        let x = PlayerView::new(a.session().clone(), Seat::Remote(Role::First), GRACE);
        let o = PlayerView::new(b.session().clone(), Seat::Remote(Role::Second), GRACE);
        assert!(render(&x).contains("Your turn: X"));
        assert!(render(&o).contains("Opponent's turn: X"));
    }

    #[test]
    fn test_disconnect_footer() {
        let matchmaker = Matchmaker::new();
        let a = matchmaker.pair();
        let b = matchmaker.pair();
        a.session().leave();
        let mut o = PlayerView::new(b.session().clone(), Seat::Remote(Role::Second), GRACE);
        o.reconcile(Instant::now());
        assert!(render(&o).contains("Opponent disconnected! Game will end in 5 seconds..."));
    }

    #[test]
    fn test_local_footer() {
        let view = PlayerView::new(Arc::new(GameSession::solo()), Seat::Local, GRACE);
        assert!(render(&view).contains("Turn: X"));
    }

    #[test]
    fn test_win_screen_shows_banner_and_final_board() {
        let session = Arc::new(GameSession::solo());
        for (role, (row, col)) in [
            (Role::First, (0, 0)),
            (Role::Second, (1, 0)),
            (Role::First, (0, 1)),
            (Role::Second, (1, 1)),
            (Role::First, (0, 2)),
        ] {
            session.try_place(role, Coord::new(row, col).unwrap()).unwrap();
        }
        let view = PlayerView::new(session, Seat::Local, GRACE);
        let screen = render(&view);
        assert!(screen.contains(&banner("X WINS!")[0]));
        assert!(screen.contains("[X][X][X]"));
        assert!(screen.contains("[O][O][ ]"));
        assert!(screen.contains(HELP));
    }

    #[test]
    fn test_draw_screen() {
        let session = Arc::new(GameSession::solo());
        for (role, (row, col)) in [
            (Role::First, (0, 0)),
            (Role::Second, (0, 1)),
            (Role::First, (0, 2)),
            (Role::Second, (1, 1)),
            (Role::First, (1, 0)),
            (Role::Second, (2, 0)),
            (Role::First, (2, 1)),
            (Role::Second, (1, 2)),
            (Role::First, (2, 2)),
        ] {
            session.try_place(role, Coord::new(row, col).unwrap()).unwrap();
        }
        let view = PlayerView::new(session, Seat::Local, GRACE);
        let screen = render(&view);
        assert!(screen.contains(&banner("DRAW")[2]));
        assert!(screen.contains("It's a draw! Press r to restart, q to quit"));
    }
}

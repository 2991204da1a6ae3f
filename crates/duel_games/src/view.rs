//! Per-participant projection of a shared session.
//!
//! A [`PlayerView`] owns everything local to one participant (cursor,
//! disconnect countdown) plus a copy of the shared state taken on the last
//! reconciliation. It never holds the session lock between calls.

use crate::input::Intent;
use crate::session::{GameSession, SessionSnapshot};
use crate::ui;
use duel_tictactoe::{Board, Coord, Line, Outcome, Role};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

/// How a participant sits at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    /// Hot-seat play: whoever holds the turn moves.
    Local,
    /// Remote play as a fixed role.
    Remote(Role),
}

/// Why a view's control loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The player asked to leave.
    Quit,
    /// The opponent stayed disconnected past the grace period.
    OpponentGone,
    /// The input stream closed, i.e. this participant's connection ended.
    InputClosed,
}

/// One participant's view of a [`GameSession`].
#[derive(Debug)]
pub struct PlayerView {
    session: Arc<GameSession>,
    seat: Seat,
    grace: Duration,
    cursor: Coord,
    board: Board,
    turn: Role,
    outcome: Outcome,
    winning_line: Option<Line>,
    waiting_for_opponent: bool,
    opponent_disconnected: bool,
    disconnect_since: Option<Instant>,
    round: u64,
}

impl PlayerView {
    /// Creates a view and projects the session's current state into it.
    pub fn new(session: Arc<GameSession>, seat: Seat, grace: Duration) -> Self {
        let snapshot = session.snapshot();
        let mut view = Self {
            session,
            seat,
            grace,
            cursor: Coord::ORIGIN,
            board: Board::new(),
            turn: Role::First,
            outcome: Outcome::Undecided,
            winning_line: None,
            waiting_for_opponent: false,
            opponent_disconnected: false,
            disconnect_since: None,
            round: snapshot.round,
        };
        view.project(&snapshot);
        view
    }

    /// Session this view reads from.
    pub fn session(&self) -> &Arc<GameSession> {
        &self.session
    }

    /// How this participant is seated.
    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Disconnect grace period.
    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Cell under the cursor.
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Board as of the last reconciliation.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Role to move as of the last reconciliation.
    pub fn turn(&self) -> Role {
        self.turn
    }

    /// Outcome as of the last reconciliation.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Winning line as of the last reconciliation.
    pub fn winning_line(&self) -> Option<Line> {
        self.winning_line
    }

    /// True when the game is undecided and this participant may move.
    pub fn is_my_turn(&self) -> bool {
        if self.outcome.is_decided() {
            return false;
        }
        match self.seat {
            Seat::Local => true,
            Seat::Remote(role) => role == self.turn,
        }
    }

    /// True while the session has fewer than two participants.
    pub fn waiting_for_opponent(&self) -> bool {
        self.waiting_for_opponent
    }

    /// True once the opponent's connection was seen to end.
    pub fn opponent_disconnected(&self) -> bool {
        self.opponent_disconnected
    }

    /// When this view first saw the opponent disconnected.
    pub fn disconnect_since(&self) -> Option<Instant> {
        self.disconnect_since
    }

    fn project(&mut self, snapshot: &SessionSnapshot) {
        self.board = snapshot.board.clone();
        self.turn = snapshot.turn;
        self.outcome = snapshot.outcome;
        self.winning_line = snapshot.winning_line;
        self.waiting_for_opponent = snapshot.participant_count < 2;
        self.opponent_disconnected = snapshot.disconnected;

        if snapshot.round != self.round {
            debug!(round = snapshot.round, "New round observed, resetting local state");
            self.round = snapshot.round;
            self.cursor = Coord::ORIGIN;
            self.disconnect_since = None;
        }
    }

    /// One reconciliation step.
    ///
    /// Pulls a snapshot, performs a pending restart if this view is the
    /// first to see it, refreshes the projection and advances the
    /// disconnect countdown. Returns an exit reason once the opponent has
    /// been gone for longer than the grace period.
    #[instrument(skip(self, now), fields(session_id = self.session.id(), seat = ?self.seat))]
    pub fn reconcile(&mut self, now: Instant) -> Option<ExitReason> {
        let mut snapshot = self.session.snapshot();
        if snapshot.restart_requested {
            if self.session.restart_if_requested() {
                info!("Performed requested restart");
            }
            snapshot = self.session.snapshot();
        }
        self.project(&snapshot);

        if !matches!(self.seat, Seat::Remote(_)) || !snapshot.disconnected {
            self.disconnect_since = None;
            return None;
        }

        let since = *self.disconnect_since.get_or_insert_with(|| {
            info!("Opponent disconnected, starting countdown");
            now
        });
        if now.duration_since(since) > self.grace {
            info!("Disconnect grace period elapsed");
            return Some(ExitReason::OpponentGone);
        }
        None
    }

    /// Applies a player intent, forwarding it to the session where needed.
    ///
    /// Illegal placements are dropped without feedback.
    #[instrument(skip(self, now), fields(session_id = self.session.id(), seat = ?self.seat))]
    pub fn apply(&mut self, intent: Intent, now: Instant) -> Option<ExitReason> {
        match intent {
            Intent::MoveCursor(direction) => {
                self.cursor = self.cursor.step(direction);
                None
            }
            Intent::PlaceMark => {
                let role = match self.seat {
                    Seat::Local => self.turn,
                    Seat::Remote(role) => role,
                };
                match self.session.try_place(role, self.cursor) {
                    Ok(_) => self.reconcile(now),
                    Err(reason) => {
                        debug!(%reason, cursor = %self.cursor, "Ignoring placement");
                        None
                    }
                }
            }
            Intent::Restart => {
                self.session.request_restart();
                self.reconcile(now)
            }
            Intent::Quit => Some(ExitReason::Quit),
        }
    }
}

enum Step {
    Tick(Instant),
    Input(Option<Intent>),
}

/// Runs a view's control loop until the player quits, the input closes or
/// the opponent is gone for good.
///
/// With `tick` set the view reconciles on that period, which is the only way
/// it learns about the opponent's moves. Without it (hot-seat play) it only
/// reconciles after its own intents.
///
/// # Errors
///
/// Returns an error if drawing to the terminal fails.
#[instrument(skip_all, fields(session_id = view.session.id(), seat = ?view.seat))]
pub async fn run_view<B>(
    terminal: &mut Terminal<B>,
    view: &mut PlayerView,
    intents: &mut mpsc::Receiver<Intent>,
    tick: Option<Duration>,
) -> anyhow::Result<ExitReason>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    info!(?tick, "Starting view loop");

    let mut ticker = tick.map(|period| {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });

    loop {
        terminal.draw(|frame| ui::draw(frame, view))?;

        let step = match ticker.as_mut() {
            Some(ticker) => tokio::select! {
                now = ticker.tick() => Step::Tick(now),
                intent = intents.recv() => Step::Input(intent),
            },
            None => Step::Input(intents.recv().await),
        };

        let exit = match step {
            Step::Tick(now) => view.reconcile(now),
            Step::Input(Some(intent)) => view.apply(intent, Instant::now()),
            Step::Input(None) => Some(ExitReason::InputClosed),
        };

        if let Some(reason) = exit {
            info!(?reason, "View loop finished");
            return Ok(reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchmaker::Matchmaker;
    use duel_tictactoe::Direction;

    const GRACE: Duration = Duration::from_secs(5);

    fn pair() -> (PlayerView, PlayerView) {
        let matchmaker = Matchmaker::new();
        let a = matchmaker.pair();
        let b = matchmaker.pair();
        (
            PlayerView::new(a.session().clone(), Seat::Remote(*a.role()), GRACE),
            PlayerView::new(b.session().clone(), Seat::Remote(*b.role()), GRACE),
        )
    }

    #[test]
    fn test_turn_projection_after_tick() {
        let (mut x, mut o) = pair();
        let now = Instant::now();
        x.reconcile(now);
        o.reconcile(now);
        assert!(x.is_my_turn());
        assert!(!o.is_my_turn());
        assert!(!x.waiting_for_opponent());

        x.apply(Intent::PlaceMark, now);
        // O only learns about the move on its next tick.
        assert!(!o.is_my_turn());
        o.reconcile(now);
        assert!(o.is_my_turn());
        assert!(!x.is_my_turn());
        assert_eq!(o.board().get(Coord::ORIGIN).role(), Some(Role::First));
    }

    #[test]
    fn test_first_view_waits_until_second_joins() {
        let matchmaker = Matchmaker::new();
        let a = matchmaker.pair();
        let mut x = PlayerView::new(a.session().clone(), Seat::Remote(Role::First), GRACE);
        assert!(x.waiting_for_opponent());

        matchmaker.pair();
        x.reconcile(Instant::now());
        assert!(!x.waiting_for_opponent());
    }

    #[test]
    fn test_out_of_turn_place_is_ignored() {
        let (mut x, mut o) = pair();
        let now = Instant::now();
        assert_eq!(o.apply(Intent::PlaceMark, now), None);
        x.reconcile(now);
        o.reconcile(now);
        assert_eq!(o.board(), &Board::new());
        assert!(x.is_my_turn());
    }

    #[test]
    fn test_restart_converges_both_views() {
        let (mut x, mut o) = pair();
        let now = Instant::now();
        x.apply(Intent::MoveCursor(Direction::Down), now);
        x.apply(Intent::PlaceMark, now);
        o.apply(Intent::MoveCursor(Direction::Right), now);
        o.reconcile(now);
        o.apply(Intent::PlaceMark, now);

        o.apply(Intent::Restart, now);
        let snapshot = o.session().snapshot();
        assert!(!snapshot.restart_requested);
        assert_eq!(snapshot.board, Board::new());
        assert_eq!(o.cursor(), Coord::ORIGIN);

        x.reconcile(now);
        assert_eq!(x.board(), &Board::new());
        assert_eq!(x.cursor(), Coord::ORIGIN);
        assert!(x.is_my_turn());
    }

    #[test]
    fn test_both_requests_before_reconcile_reset_once() {
        let (mut x, mut o) = pair();
        let now = Instant::now();
        x.apply(Intent::PlaceMark, now);

        // Both requests land before either view reconciles.
        x.session().request_restart();
        o.session().request_restart();
        x.reconcile(now);
        o.reconcile(now);

        let snapshot = x.session().snapshot();
        assert_eq!(snapshot.round, 1);
        assert!(!snapshot.restart_requested);
        assert_eq!(x.board(), &Board::new());
        assert_eq!(o.board(), &Board::new());
    }

    #[test]
    fn test_disconnect_countdown_is_strictly_longer_than_grace() {
        let (_x, mut o) = pair();
        let start = Instant::now();
        o.session().leave();

        assert_eq!(o.reconcile(start), None);
        assert!(o.opponent_disconnected());
        assert_eq!(o.disconnect_since(), Some(start));
        assert_eq!(o.reconcile(start + GRACE), None);
        assert_eq!(
            o.reconcile(start + GRACE + Duration::from_millis(100)),
            Some(ExitReason::OpponentGone)
        );
    }

    #[test]
    fn test_restart_cancels_disconnect_countdown() {
        let (_x, mut o) = pair();
        let start = Instant::now();
        o.session().leave();
        o.reconcile(start);
        assert!(o.disconnect_since().is_some());

        o.apply(Intent::Restart, start + Duration::from_secs(1));
        assert!(o.disconnect_since().is_none());
        assert!(!o.opponent_disconnected());
        assert!(o.waiting_for_opponent());
    }

    #[test]
    fn test_local_seat_plays_both_roles() {
        let session = Arc::new(GameSession::solo());
        let mut view = PlayerView::new(session, Seat::Local, GRACE);
        let now = Instant::now();

        view.apply(Intent::PlaceMark, now);
        assert_eq!(view.turn(), Role::Second);
        assert!(view.is_my_turn());

        view.apply(Intent::MoveCursor(Direction::Right), now);
        view.apply(Intent::PlaceMark, now);
        assert_eq!(
            view.board().get(Coord::new(0, 1).unwrap()).role(),
            Some(Role::Second)
        );
        assert_eq!(view.turn(), Role::First);
    }

    #[test]
    fn test_quit() {
        let (mut x, _o) = pair();
        assert_eq!(x.apply(Intent::Quit, Instant::now()), Some(ExitReason::Quit));
    }
}

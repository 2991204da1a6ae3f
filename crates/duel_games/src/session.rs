//! Shared game session for two participants.
//!
//! A [`GameSession`] is a monitor: the game and its coordination flags live
//! behind one `RwLock` and are only reachable through the methods below.
//! Each method takes the lock for exactly the read or mutation it performs
//! and never holds it across an `.await` or a render.

use duel_tictactoe::{Board, Coord, Game, Line, Outcome, PlaceRejection, Role};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, instrument};

/// Unique identifier for a game session, used in log fields.
pub type SessionId = u64;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Immutable copy of a session, safe to render without holding the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Session the copy was taken from.
    pub id: SessionId,
    /// Current board.
    pub board: Board,
    /// Role that moves next; meaningful only while undecided.
    pub turn: Role,
    /// Outcome so far.
    pub outcome: Outcome,
    /// Completed line, present iff the outcome is `Won`.
    pub winning_line: Option<Line>,
    /// Roles currently bound to a live connection.
    pub participant_count: u8,
    /// A participant's connection ended.
    pub disconnected: bool,
    /// A participant asked for a restart that has not been performed yet.
    pub restart_requested: bool,
    /// Number of resets performed so far.
    pub round: u64,
}

#[derive(Debug)]
struct SessionState {
    game: Game,
    participant_count: u8,
    disconnected: bool,
    restart_requested: bool,
    round: u64,
}

impl SessionState {
    fn mark_disconnected(&mut self) {
        self.disconnected = true;
    }
}

/// Authoritative game state shared by the two participants of a pairing.
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    state: RwLock<SessionState>,
}

impl GameSession {
    fn with_participants(participant_count: u8) -> Self {
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        info!(session_id = id, participant_count, "Creating new game session");
        Self {
            id,
            state: RwLock::new(SessionState {
                game: Game::new(),
                participant_count,
                disconnected: false,
                restart_requested: false,
                round: 0,
            }),
        }
    }

    /// A session holding its first participant, waiting for a second.
    pub fn waiting() -> Self {
        Self::with_participants(1)
    }

    /// A session for hot-seat play, where one participant holds both roles.
    pub fn solo() -> Self {
        Self::with_participants(2)
    }

    /// Session ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Places `role`'s mark at `at` as one atomic step.
    ///
    /// Legality checks, the write, outcome evaluation and the turn change
    /// all happen under a single write lock, so two participants racing for
    /// the same turn can never both succeed.
    ///
    /// # Errors
    ///
    /// Returns the [`PlaceRejection`] reason; the session is unchanged.
    #[instrument(skip(self), fields(session_id = self.id))]
    pub fn try_place(&self, role: Role, at: Coord) -> Result<Outcome, PlaceRejection> {
        let result = self.write().game.place(role, at);
        match &result {
            Ok(outcome) => info!(?outcome, "Mark placed"),
            Err(reason) => debug!(%reason, "Placement rejected"),
        }
        result
    }

    /// Flags that a participant wants a new game. Idempotent.
    #[instrument(skip(self), fields(session_id = self.id))]
    pub fn request_restart(&self) {
        self.write().restart_requested = true;
        info!("Restart requested");
    }

    /// Performs a pending restart, if there is one.
    ///
    /// Resets the board, turn, outcome, winning line and both flags, and
    /// bumps the round counter. Returns `true` only for the caller that
    /// actually performed the reset, so concurrent requests collapse into a
    /// single reset.
    #[instrument(skip(self), fields(session_id = self.id))]
    pub fn restart_if_requested(&self) -> bool {
        let round = {
            let mut state = self.write();
            if !state.restart_requested {
                return false;
            }
            state.game.reset();
            state.disconnected = false;
            state.restart_requested = false;
            state.round += 1;
            state.round
        };
        info!(round, "Session restarted");
        true
    }

    /// Records that a participant's connection ended. Idempotent.
    #[instrument(skip(self), fields(session_id = self.id))]
    pub fn mark_disconnected(&self) {
        self.write().mark_disconnected();
        info!("Participant disconnected");
    }

    /// Binds one more participant; returns the new count.
    #[instrument(skip(self), fields(session_id = self.id))]
    pub fn join(&self) -> u8 {
        let mut state = self.write();
        state.participant_count = (state.participant_count + 1).min(2);
        state.participant_count
    }

    /// Connection-closed handler: unbinds a participant and raises the
    /// disconnect flag for whoever is left, in one critical section.
    #[instrument(skip(self), fields(session_id = self.id))]
    pub fn leave(&self) {
        {
            let mut state = self.write();
            state.participant_count = state.participant_count.saturating_sub(1);
            state.mark_disconnected();
        }
        info!("Participant left");
    }

    /// Copies every field out under the read lock.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.read();
        SessionSnapshot {
            id: self.id,
            board: state.game.board().clone(),
            turn: state.game.turn(),
            outcome: state.game.outcome(),
            winning_line: state.game.winning_line(),
            participant_count: state.participant_count,
            disconnected: state.disconnected,
            restart_requested: state.restart_requested,
            round: state.round,
        }
    }
}

//! Pairs arriving participants into two-player sessions.

use crate::session::GameSession;
use derive_getters::Getters;
use derive_new::new;
use duel_tictactoe::Role;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, instrument};

/// A participant's seat: the session it joined and the role it plays.
#[derive(Debug, Clone, Getters, new)]
pub struct Pairing {
    /// Shared session.
    session: Arc<GameSession>,
    /// Role assigned at pairing time.
    role: Role,
}

/// Single-slot waiting room.
///
/// Holds at most one session with exactly one participant. The second
/// arrival takes that session and empties the slot, so the third arrival
/// starts a fresh pair.
#[derive(Debug, Default)]
pub struct Matchmaker {
    waiting: Mutex<Option<Arc<GameSession>>>,
}

impl Matchmaker {
    /// Creates a matchmaker with an empty waiting slot.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<GameSession>>> {
        self.waiting.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Assigns the caller a session and a role.
    #[instrument(skip(self))]
    pub fn pair(&self) -> Pairing {
        let mut slot = self.slot();
        match slot.take() {
            Some(session) => {
                let participants = session.join();
                info!(session_id = session.id(), participants, "Second player joined");
                Pairing::new(session, Role::Second)
            }
            None => {
                let session = Arc::new(GameSession::waiting());
                info!(session_id = session.id(), "First player waiting for opponent");
                *slot = Some(Arc::clone(&session));
                Pairing::new(session, Role::First)
            }
        }
    }

    /// Drops `session` from the waiting slot if it is still there.
    ///
    /// Called when a connection ends, so a participant who leaves before
    /// anyone joined does not leave an abandoned session behind. Returns
    /// `true` if the slot was cleared.
    #[instrument(skip_all, fields(session_id = session.id()))]
    pub fn release(&self, session: &Arc<GameSession>) -> bool {
        let mut slot = self.slot();
        let is_waiting = slot
            .as_ref()
            .is_some_and(|waiting| Arc::ptr_eq(waiting, session));
        if is_waiting {
            *slot = None;
            info!("Waiting session abandoned");
        }
        is_waiting
    }

    /// True while a session is waiting for its second participant.
    pub fn has_waiting(&self) -> bool {
        self.slot().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_sequence() {
        let matchmaker = Matchmaker::new();

        let first = matchmaker.pair();
        assert_eq!(*first.role(), Role::First);
        assert_eq!(first.session().snapshot().participant_count, 1);
        assert!(matchmaker.has_waiting());

        let second = matchmaker.pair();
        assert_eq!(*second.role(), Role::Second);
        assert!(Arc::ptr_eq(first.session(), second.session()));
        assert_eq!(first.session().snapshot().participant_count, 2);
        assert!(!matchmaker.has_waiting());

        let third = matchmaker.pair();
        assert_eq!(*third.role(), Role::First);
        assert!(!Arc::ptr_eq(first.session(), third.session()));
        assert_eq!(third.session().snapshot().participant_count, 1);
    }

    #[test]
    fn test_release_clears_only_the_waiting_session() {
        let matchmaker = Matchmaker::new();
        let first = matchmaker.pair();
        let second = matchmaker.pair();
        let third = matchmaker.pair();

        // Already paired: nothing to release.
        assert!(!matchmaker.release(second.session()));
        assert!(matchmaker.has_waiting());

        assert!(matchmaker.release(third.session()));
        assert!(!matchmaker.has_waiting());

        // The next arrival starts fresh instead of joining the abandoned one.
        let fourth = matchmaker.pair();
        assert_eq!(*fourth.role(), Role::First);
        assert!(!Arc::ptr_eq(fourth.session(), third.session()));
        assert!(!Arc::ptr_eq(fourth.session(), first.session()));
    }
}

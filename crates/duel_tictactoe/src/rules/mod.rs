//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board), evaluated after every
//! placement. Rules are kept apart from board storage so the session layer
//! can call them inside its own critical section.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::evaluate_outcome;

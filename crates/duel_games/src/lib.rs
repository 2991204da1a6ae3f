//! Duel - two-player tic-tac-toe over shared game sessions
//!
//! Players either share one terminal (hot-seat) or connect to a hosted
//! server over telnet and get paired into sessions.
//!
//! # Architecture
//!
//! - **Session**: the authoritative, lock-guarded game state shared by two players
//! - **Matchmaker**: pairs incoming players into sessions
//! - **View**: each player's projection of a session, refreshed on a tick
//! - **Transport**: TCP listener and per-connection terminal plumbing
//! - **UI**: stateless ratatui rendering of a view
//!
//! # Example
//!
//! ```
//! use duel_games::{Matchmaker, PlayerView, Seat};
//! use duel_tictactoe::{Coord, Role};
//! use std::time::Duration;
//!
//! let matchmaker = Matchmaker::new();
//! let first = matchmaker.pair();
//! let second = matchmaker.pair();
//! assert_eq!(first.session().id(), second.session().id());
//!
//! first.session().try_place(Role::First, Coord::CENTER).unwrap();
//!
//! let view = PlayerView::new(
//!     second.session().clone(),
//!     Seat::Remote(*second.role()),
//!     Duration::from_secs(5),
//! );
//! assert!(view.is_my_turn());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod input;
mod local;
mod matchmaker;
mod session;
mod transport;
mod ui;
mod view;

// Crate-level exports - Configuration
pub use config::{ConfigError, DuelConfig};

// Crate-level exports - Input
pub use input::{InputDecoder, Intent, IAC, OPT_ECHO, OPT_SUPPRESS_GO_AHEAD, TELNET_CHARACTER_MODE};

// Crate-level exports - Session management
pub use matchmaker::{Matchmaker, Pairing};
pub use session::{GameSession, SessionId, SessionSnapshot};

// Crate-level exports - Views and rendering
pub use ui::{banner, draw};
pub use view::{run_view, ExitReason, PlayerView, Seat};

// Crate-level exports - Front ends
pub use local::run_local;
pub use transport::{handle_connection, serve, RemoteWriter};

//! Hot-seat play on the local terminal.

use crate::config::DuelConfig;
use crate::input::Intent;
use crate::session::GameSession;
use crate::view::{run_view, ExitReason, PlayerView, Seat};
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs one hot-seat game on stdin/stdout until the player quits.
///
/// Both roles share the keyboard; whoever holds the turn places the mark.
///
/// # Errors
///
/// Returns an error if the terminal cannot be put into raw mode or drawing
/// fails.
#[instrument(skip_all)]
pub async fn run_local(config: &DuelConfig) -> Result<ExitReason> {
    info!("Starting local game");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let (tx, mut intents) = mpsc::channel(32);
    let keys = thread::spawn(move || forward_keys(tx));

    let session = Arc::new(GameSession::solo());
    let mut view = PlayerView::new(session, Seat::Local, config.disconnect_grace());
    let res = run_view(&mut terminal, &mut view, &mut intents, None).await;

    // Dropping the receiver tells the key thread to stop.
    drop(intents);
    if keys.join().is_err() {
        warn!("Key reader thread panicked");
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match &res {
        Ok(reason) => info!(?reason, "Local game ended"),
        Err(e) => error!(error = ?e, "Local game loop error"),
    }
    res
}

/// Blocking loop turning terminal key events into intents.
fn forward_keys(tx: mpsc::Sender<Intent>) {
    while !tx.is_closed() {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                error!(error = %e, "Failed to poll terminal events");
                return;
            }
        }
        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(e) => {
                error!(error = %e, "Failed to read terminal event");
                return;
            }
        };
        if let Some(intent) = Intent::from_key(key) {
            debug!(?intent, "Key intent");
            if tx.blocking_send(intent).is_err() {
                return;
            }
        }
    }
}

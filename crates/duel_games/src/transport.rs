//! Hosted play over TCP.
//!
//! Every accepted connection is a remote terminal speaking raw bytes
//! (telnet, or `nc` with the local terminal in raw mode). Connections are
//! accepted without authentication. Each one gets its own task that pairs it
//! through the shared [`Matchmaker`] and runs a [`PlayerView`] over it.

use crate::config::DuelConfig;
use crate::input::{InputDecoder, Intent, TELNET_CHARACTER_MODE};
use crate::matchmaker::Matchmaker;
use crate::view::{run_view, ExitReason, PlayerView, Seat};
use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    Terminal, TerminalOptions, Viewport,
};
use std::future::Future;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Buffered `io::Write` that hands each flushed chunk to a writer task.
///
/// Lets ratatui's synchronous backend draw onto an async socket.
#[derive(Debug)]
pub struct RemoteWriter {
    buffer: Vec<u8>,
    out: mpsc::UnboundedSender<Vec<u8>>,
}

impl RemoteWriter {
    /// Creates a writer feeding `out`.
    pub fn new(out: mpsc::UnboundedSender<Vec<u8>>) -> Self {
        Self {
            buffer: Vec::new(),
            out,
        }
    }
}

impl Write for RemoteWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.out
            .send(std::mem::take(&mut self.buffer))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "connection closed"))
    }
}

/// Accepts connections until `shutdown` resolves, one task per participant.
///
/// Accept failures are logged and skipped; sessions already running are
/// left to finish on their own.
///
/// # Errors
///
/// Currently always returns `Ok` once `shutdown` fires.
#[instrument(skip_all, fields(addr = %config.listen_addr()))]
pub async fn serve(
    listener: TcpListener,
    matchmaker: Arc<Matchmaker>,
    config: Arc<DuelConfig>,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    info!("Accepting connections");
    tokio::pin!(shutdown);
    loop {
        let accepted = tokio::select! {
            accepted = listener.accept() => accepted,
            () = &mut shutdown => {
                info!("Shutting down listener");
                return Ok(());
            }
        };
        let (stream, peer) = match accepted {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        if let Err(e) = stream.set_nodelay(true) {
            debug!(error = %e, "Could not disable Nagle");
        }

        let (reader, writer) = stream.into_split();
        let matchmaker = Arc::clone(&matchmaker);
        let config = Arc::clone(&config);
        tokio::spawn(async move {
            handle_connection(reader, writer, peer, &matchmaker, &config).await;
        });
    }
}

/// Runs one participant from pairing to disconnect.
///
/// Whatever ends the session (quit, disconnect timeout, a dropped socket,
/// an I/O error), the participant is released from the waiting slot and
/// unbound from its session, which is how the opponent learns it is gone.
#[instrument(skip_all, fields(%peer))]
pub async fn handle_connection<R, W>(
    reader: R,
    writer: W,
    peer: SocketAddr,
    matchmaker: &Matchmaker,
    config: &DuelConfig,
) where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    info!("Player connected");

    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let writer_task = spawn_writer(writer, out_rx);
    let (intent_tx, mut intents) = mpsc::channel(32);
    let reader_task = spawn_reader(reader, intent_tx);

    let pairing = matchmaker.pair();
    let session = Arc::clone(pairing.session());
    info!(session_id = session.id(), role = %pairing.role(), "Player paired");

    let mut view = PlayerView::new(
        Arc::clone(&session),
        Seat::Remote(*pairing.role()),
        config.disconnect_grace(),
    );

    match play(RemoteWriter::new(out_tx), &mut view, &mut intents, config).await {
        Ok(reason) => info!(?reason, "Player session ended"),
        Err(e) => warn!(error = %e, "Player session ended with error"),
    }

    matchmaker.release(&session);
    session.leave();

    reader_task.abort();
    if let Err(e) = writer_task.await {
        debug!(error = %e, "Writer task did not finish cleanly");
    }
    info!(session_id = session.id(), "Player disconnected");
}

async fn play(
    mut out: RemoteWriter,
    view: &mut PlayerView,
    intents: &mut mpsc::Receiver<Intent>,
    config: &DuelConfig,
) -> Result<ExitReason> {
    out.write_all(&TELNET_CHARACTER_MODE)?;
    queue!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
    out.flush().context("Failed to set up remote terminal")?;

    let viewport = Viewport::Fixed(Rect::new(0, 0, *config.term_cols(), *config.term_rows()));
    let mut terminal = Terminal::with_options(CrosstermBackend::new(out), TerminalOptions { viewport })?;

    let reason = run_view(&mut terminal, view, intents, Some(config.tick())).await;

    // Best effort: the other end may already be gone.
    let out = terminal.backend_mut();
    let restored = queue!(out, Clear(ClearType::All), MoveTo(0, 0), Show, LeaveAlternateScreen);
    if let Err(e) = restored.and_then(|()| out.flush()) {
        debug!(error = %e, "Could not restore remote terminal");
    }

    reason
}

fn spawn_writer<W>(mut writer: W, mut chunks: mpsc::UnboundedReceiver<Vec<u8>>) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(chunk) = chunks.recv().await {
            if let Err(e) = writer.write_all(&chunk).await {
                debug!(error = %e, "Socket write failed");
                break;
            }
        }
        if let Err(e) = writer.shutdown().await {
            debug!(error = %e, "Socket shutdown failed");
        }
    })
}

/// Reads until EOF or error; ending drops `intents`, which the view loop
/// sees as its connection closing.
fn spawn_reader<R>(mut reader: R, intents: mpsc::Sender<Intent>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut decoder = InputDecoder::new();
        let mut buf = [0u8; 256];
        loop {
            let read = match reader.read(&mut buf).await {
                Ok(0) => {
                    debug!("Remote closed the connection");
                    return;
                }
                Ok(n) => n,
                Err(e) => {
                    error!(error = %e, "Socket read failed");
                    return;
                }
            };
            for intent in decoder.feed(&buf[..read]) {
                if intents.send(intent).await.is_err() {
                    return;
                }
            }
        }
    })
}

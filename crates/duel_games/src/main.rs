//! Duel - Unified CLI
//!
//! Hot-seat tic-tac-toe on this terminal, or a telnet server pairing remote
//! players.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use duel_games::{run_local, serve, DuelConfig, Matchmaker};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

const LOCAL_LOG_FILE: &str = "duel.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command() {
        Command::Local => run_local_game().await,
        Command::Host { host, port, config } => run_host(host, port, config).await,
    }
}

/// Run a hot-seat game, logging to a file so the screen stays clean
async fn run_local_game() -> Result<()> {
    let log_file = std::fs::File::create(LOCAL_LOG_FILE)
        .with_context(|| format!("Failed to create {LOCAL_LOG_FILE}"))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    let config = DuelConfig::default();
    run_local(&config).await?;
    Ok(())
}

/// Run the telnet game server
#[instrument(skip_all)]
async fn run_host(host: Option<String>, port: Option<u16>, config: Option<PathBuf>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = DuelConfig::load(config.as_deref())?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Server listening");
    info!(
        "Players can connect with: telnet {} {}",
        config.host(),
        config.port()
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    serve(listener, Arc::new(Matchmaker::new()), Arc::new(config), shutdown).await
}

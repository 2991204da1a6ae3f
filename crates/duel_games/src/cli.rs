//! Command-line interface for duel.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Duel - two-player tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "duel")]
#[command(about = "Two-player tic-tac-toe, hot-seat or over telnet", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `local`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play hot-seat on this terminal
    Local,

    /// Host games for remote players over telnet
    Host {
        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// The chosen command, `local` when none was given.
    pub fn command(self) -> Command {
        self.command.unwrap_or(Command::Local)
    }
}

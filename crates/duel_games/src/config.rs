//! Server and timing configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Configuration for hosted and local play.
///
/// Every field has a default, so a TOML file only needs the keys it
/// changes. Command-line flags are applied on top with the `with_*`
/// setters.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct DuelConfig {
    /// Address the hosted server binds to.
    #[serde(default = "default_host")]
    host: String,

    /// Port the hosted server listens on.
    #[serde(default = "default_port")]
    port: u16,

    /// Reconciliation period in milliseconds.
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,

    /// Seconds a survivor keeps playing after seeing the opponent leave.
    #[serde(default = "default_disconnect_grace_secs")]
    disconnect_grace_secs: u64,

    /// Width of the viewport drawn on remote terminals.
    #[serde(default = "default_term_cols")]
    term_cols: u16,

    /// Height of the viewport drawn on remote terminals.
    #[serde(default = "default_term_rows")]
    term_rows: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    2222
}

fn default_tick_ms() -> u64 {
    100
}

fn default_disconnect_grace_secs() -> u64 {
    5
}

fn default_term_cols() -> u16 {
    80
}

fn default_term_rows() -> u16 {
    24
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tick_ms: default_tick_ms(),
            disconnect_grace_secs: default_disconnect_grace_secs(),
            term_cols: default_term_cols(),
            term_rows: default_term_rows(),
        }
    }
}

impl DuelConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.tick_ms == 0 {
            return Err(ConfigError::new("tick_ms must be greater than zero"));
        }

        info!(port = config.port, tick_ms = config.tick_ms, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Reconciliation period.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Disconnect grace period.
    pub fn disconnect_grace(&self) -> Duration {
        Duration::from_secs(self.disconnect_grace_secs)
    }

    /// `host:port` for the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

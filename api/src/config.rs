//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::{bail, Context, Result};
use std::str::FromStr;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3001;

/// Maximum accepted request body size when `DEBUG_SINK_BODY_LIMIT` is not set.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Output format for the server's own diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("unknown log format `{other}`, expected `text` or `json`"),
        }
    }
}

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `DEBUG_SINK_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `PORT`: The port to listen on (default: 3001)
/// - `DEBUG_SINK_BODY_LIMIT`: Maximum request body size in bytes (default: 1 MiB)
/// - `DEBUG_SINK_LOG_FORMAT`: `text` or `json` (default: `text`)
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
    /// Format of the server's own log lines.
    pub log_format: LogFormat,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a new configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `PORT` is set but is not a valid port number
    /// - `DEBUG_SINK_BODY_LIMIT` is set but is not a non-negative integer
    /// - `DEBUG_SINK_LOG_FORMAT` is set but is not `text` or `json`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let host = lookup("DEBUG_SINK_HOST").unwrap_or(defaults.host);

        let port = lookup("PORT")
            .map(|p| p.parse::<u16>())
            .transpose()
            .context("PORT must be a valid port number")?
            .unwrap_or(defaults.port);

        let body_limit = lookup("DEBUG_SINK_BODY_LIMIT")
            .map(|l| l.parse::<usize>())
            .transpose()
            .context("DEBUG_SINK_BODY_LIMIT must be a size in bytes")?
            .unwrap_or(defaults.body_limit);

        let log_format = lookup("DEBUG_SINK_LOG_FORMAT")
            .map(|f| f.parse::<LogFormat>())
            .transpose()?
            .unwrap_or(defaults.log_format);

        Ok(Self {
            host,
            port,
            body_limit,
            log_format,
        })
    }

    /// Returns the `host:port` string to bind to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            body_limit: DEFAULT_BODY_LIMIT,
            log_format: LogFormat::default(),
        }
    }
}

#![forbid(unsafe_code)]

//! Log subscriber setup for the explorer binary.
//!
//! Library crates only emit `tracing` events and spans. The binary decides
//! where they go: stderr, filtered by `ALGOVIZ_LOG` (env-filter directives,
//! default `warn`), as plain lines or as JSON when `ALGOVIZ_LOG_JSON=1`.
//! Stdout stays reserved for panel text.

use std::env;
use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

pub const FILTER_VAR: &str = "ALGOVIZ_LOG";
pub const JSON_VAR: &str = "ALGOVIZ_LOG_JSON";
pub const DEFAULT_FILTER: &str = "warn";

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Env-filter directives, e.g. `algoviz_runtime=debug,warn`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Plain,
        }
    }
}

impl LogConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Read settings through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(filter) = var(FILTER_VAR).filter(|f| !f.trim().is_empty()) {
            config.filter = filter;
        }
        if let Some(flag) = var(JSON_VAR)
            && matches!(flag.trim(), "1" | "true" | "yes")
        {
            config.format = LogFormat::Json;
        }
        config
    }

    /// Filter built from the directives, falling back to the default level
    /// when they do not parse.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }

    /// Install the global subscriber.
    ///
    /// Fails if a global subscriber is already set.
    pub fn init(&self) -> Result<(), TryInitError> {
        let (json, plain) = match self.format {
            LogFormat::Json => (
                Some(fmt::layer().json().with_writer(io::stderr)),
                None,
            ),
            LogFormat::Plain => (
                None,
                Some(fmt::layer().with_target(true).with_writer(io::stderr)),
            ),
        };
        tracing_subscriber::registry()
            .with(self.env_filter())
            .with(json)
            .with(plain)
            .try_init()
    }
}

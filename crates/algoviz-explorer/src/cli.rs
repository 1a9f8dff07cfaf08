#![forbid(unsafe_code)]

//! Command-line argument parsing for the explorer.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `ALGOVIZ_*` prefix.

use std::env;
use std::fmt;
use std::path::PathBuf;

use algoviz_runtime::Tab;
use algoviz_widgets::viz::CanvasConfig;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
algoviz explorer: browse an algorithm catalog from the terminal

USAGE:
    algoviz-explorer [OPTIONS]

OPTIONS:
    --data-dir=DIR       Directory holding algorithms.json and examples/ (default: data)
    --algorithm=NAME     Algorithm to show (default: first in the catalog)
    --tab=TAB            Tab to print: overview (default), docs, visualization
    --width=N            Canvas width in pixels (default: 800)
    --height=N           Canvas height in pixels (default: 260)
    --png=PATH           Write the visualization canvas to a PNG file
    --list               Print the sidebar listing and exit
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    ALGOVIZ_DATA_DIR     Override --data-dir
    ALGOVIZ_ALGORITHM    Override --algorithm
    ALGOVIZ_TAB          Override --tab
    ALGOVIZ_WIDTH        Override --width
    ALGOVIZ_HEIGHT       Override --height
    ALGOVIZ_LOG          Log filter directives (default: warn)
    ALGOVIZ_LOG_JSON     Set to 1 for JSON log lines on stderr";

/// Default catalog directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub data_dir: PathBuf,
    /// Algorithm to select; `None` keeps the first catalog entry.
    pub algorithm: Option<String>,
    pub tab: Tab,
    pub width: u32,
    pub height: u32,
    pub png: Option<PathBuf>,
    pub list: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            algorithm: None,
            tab: Tab::Overview,
            width: CanvasConfig::DEFAULT_WIDTH,
            height: CanvasConfig::DEFAULT_HEIGHT,
            png: None,
            list: false,
        }
    }
}

/// What the binary should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Invalid command-line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A flag value failed to parse.
    InvalidValue { flag: &'static str, value: String },
    /// Unrecognized argument.
    UnknownArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            CliError::UnknownArgument(arg) => {
                write!(f, "Unknown argument: {arg}\nRun with --help for usage")
            }
        }
    }
}

impl std::error::Error for CliError {}

fn positive(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

impl Opts {
    /// Parse the process arguments and environment.
    pub fn from_env() -> Result<Command, CliError> {
        Self::parse_from(env::args().skip(1), |key| env::var(key).ok())
    }

    /// Parse `args` (without the program name), reading overrides through
    /// `var`.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags. Unparseable environment values are
    /// ignored.
    pub fn parse_from<I, S, F>(args: I, var: F) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = var("ALGOVIZ_DATA_DIR").and_then(non_empty) {
            opts.data_dir = PathBuf::from(val);
        }
        if let Some(val) = var("ALGOVIZ_ALGORITHM").and_then(non_empty) {
            opts.algorithm = Some(val);
        }
        if let Some(val) = var("ALGOVIZ_TAB")
            && let Ok(tab) = val.parse()
        {
            opts.tab = tab;
        }
        if let Some(val) = var("ALGOVIZ_WIDTH")
            && let Some(n) = positive(&val)
        {
            opts.width = n;
        }
        if let Some(val) = var("ALGOVIZ_HEIGHT")
            && let Some(n) = positive(&val)
        {
            opts.height = n;
        }

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--list" => opts.list = true,
                other => {
                    if let Some(val) = other.strip_prefix("--data-dir=") {
                        opts.data_dir = PathBuf::from(val);
                    } else if let Some(val) = other.strip_prefix("--algorithm=") {
                        opts.algorithm = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--tab=") {
                        opts.tab = val.parse().map_err(|_| CliError::InvalidValue {
                            flag: "--tab",
                            value: val.to_string(),
                        })?;
                    } else if let Some(val) = other.strip_prefix("--width=") {
                        opts.width = positive(val).ok_or_else(|| CliError::InvalidValue {
                            flag: "--width",
                            value: val.to_string(),
                        })?;
                    } else if let Some(val) = other.strip_prefix("--height=") {
                        opts.height = positive(val).ok_or_else(|| CliError::InvalidValue {
                            flag: "--height",
                            value: val.to_string(),
                        })?;
                    } else if let Some(val) = other.strip_prefix("--png=") {
                        opts.png = Some(PathBuf::from(val));
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }

    /// Canvas configuration for the requested size.
    pub fn canvas_config(&self) -> CanvasConfig {
        CanvasConfig::default().with_size(self.width, self.height)
    }
}

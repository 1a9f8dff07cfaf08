#![forbid(unsafe_code)]

//! Elm-style program contract.
//!
//! A [`Model`] holds all application state. Messages go in through
//! [`Model::update`], which returns a [`Cmd`] describing side effects for the
//! host to perform; [`Model::view`] repaints a surface from the current state
//! and never mutates it.
//!
//! # Example
//!
//! ```
//! use algoviz_render::Surface;
//! use algoviz_runtime::fetch::FetchOutcome;
//! use algoviz_runtime::program::{Cmd, Model};
//!
//! struct Counter(u32);
//!
//! enum Msg {
//!     Bump,
//!     Fetched,
//! }
//!
//! impl From<FetchOutcome> for Msg {
//!     fn from(_: FetchOutcome) -> Self {
//!         Msg::Fetched
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         if let Msg::Bump = msg {
//!             self.0 += 1;
//!         }
//!         Cmd::none()
//!     }
//!
//!     fn view(&self, _surface: &mut dyn Surface) {}
//! }
//! ```

use algoviz_render::Surface;

use crate::fetch::{FetchOutcome, FetchRequest};

/// The application model.
pub trait Model: Sized {
    /// Messages that update the model.
    ///
    /// Completed fetches are delivered as messages, so every message type
    /// must be buildable from a [`FetchOutcome`].
    type Message: From<FetchOutcome> + Send + 'static;

    /// Startup commands, run once before any message.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Apply a message and return follow-up commands.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Repaint `surface` from the current state.
    fn view(&self, surface: &mut dyn Surface);
}

/// Side effects requested by a model.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Execute several commands in order.
    Batch(Vec<Cmd<M>>),
    /// Feed a message straight back into `update`.
    Msg(M),
    /// A line for the host's log output.
    Log(String),
    /// Ask the host to fetch data; the result returns as a message.
    Fetch(FetchRequest),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Log(s) => f.debug_tuple("Log").field(s).finish(),
            Self::Fetch(req) => f.debug_tuple("Fetch").field(req).finish(),
        }
    }
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    #[inline]
    pub fn fetch(request: FetchRequest) -> Self {
        Self::Fetch(request)
    }

    /// Combine commands, collapsing empty and single-element batches.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds
            .into_iter()
            .filter(|cmd| !matches!(cmd, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }

    /// Stable name for logs.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Batch(_) => "Batch",
            Self::Msg(_) => "Msg",
            Self::Log(_) => "Log",
            Self::Fetch(_) => "Fetch",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Fetch requests in this command, depth-first in execution order.
    pub fn fetches(&self) -> Vec<&FetchRequest> {
        let mut out = Vec::new();
        self.collect_fetches(&mut out);
        out
    }

    fn collect_fetches<'a>(&'a self, out: &mut Vec<&'a FetchRequest>) {
        match self {
            Self::Fetch(req) => out.push(req),
            Self::Batch(cmds) => cmds.iter().for_each(|c| c.collect_fetches(out)),
            Self::None | Self::Msg(_) | Self::Log(_) => {}
        }
    }
}

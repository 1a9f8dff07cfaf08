#![forbid(unsafe_code)]

//! `algoviz-web` runs the explorer inside a browser host.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding page pushes messages and fetch
//!   responses, and performs the fetches the program asks for.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//! - **Canvas replay**: frames leave as serialized draw ops that map one to
//!   one onto `CanvasRenderingContext2D` calls.
//!
//! This crate does not bind to `wasm-bindgen`; a thin JS glue layer wraps
//! [`step_program::StepProgram`] and moves JSON strings across.

pub mod step_program;

use algoviz_render::recording::DrawOp;
use algoviz_runtime::fetch::FetchRequest;
use serde::Serialize;

pub use step_program::{StepProgram, StepResult};

/// Web runner error type.
#[derive(Debug)]
pub enum WebError {
    /// `step` or a push was called before `init`.
    NotInitialized,
    /// `init` was called twice.
    AlreadyInitialized,
    /// A host payload (token or outputs) could not be (de)serialized.
    Payload(serde_json::Error),
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "program not initialized"),
            Self::AlreadyInitialized => write!(f, "program already initialized"),
            Self::Payload(e) => write!(f, "bad host payload: {e}"),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Payload(e) => Some(e),
            Self::NotInitialized | Self::AlreadyInitialized => None,
        }
    }
}

impl From<serde_json::Error> for WebError {
    fn from(e: serde_json::Error) -> Self {
        Self::Payload(e)
    }
}

/// Everything the host must act on after a step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebOutputs {
    /// Draw ops of the latest frame, if one was rendered since the last
    /// take. An empty frame means the canvas is idle.
    pub ops: Option<Vec<DrawOp>>,
    /// Fetches to perform, oldest first.
    pub fetches: Vec<FetchRequest>,
    /// Log lines for the host console.
    pub logs: Vec<String>,
}

impl WebOutputs {
    pub fn is_empty(&self) -> bool {
        self.ops.is_none() && self.fetches.is_empty() && self.logs.is_empty()
    }

    /// Serialize for the host.
    pub fn to_json(&self) -> Result<String, WebError> {
        Ok(serde_json::to_string(self)?)
    }
}

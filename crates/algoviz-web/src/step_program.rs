#![forbid(unsafe_code)]

//! Step-based program runner for the browser.
//!
//! [`StepProgram`] drives a [`Model`] through init / update / view cycles
//! without threads or blocking. The host controls the loop:
//!
//! 1. Push messages and fetch responses.
//! 2. Call [`StepProgram::step`] to apply them and render if anything changed.
//! 3. Read [`StepProgram::take_outputs`]: replay `ops` on the canvas and
//!    perform each requested fetch, answering through the push methods.
//!
//! # Example
//!
//! ```
//! use algoviz_runtime::fetch::FetchRequest;
//! use algoviz_web::StepProgram;
//!
//! let mut prog = StepProgram::explorer(Default::default());
//! prog.init().unwrap();
//! let out = prog.take_outputs();
//! assert_eq!(out.fetches, vec![FetchRequest::Catalog]);
//!
//! prog.push_catalog_json(r#"[{"name": "sieve", "category": "c",
//!     "summary": "s", "description": "d", "complexity": "O(n)"}]"#).unwrap();
//! let result = prog.step().unwrap();
//! assert!(result.rendered);
//! ```

use std::collections::VecDeque;

use algoviz_core::catalog::{Catalog, SampleRun};
use algoviz_render::metrics::MonospaceMetrics;
use algoviz_render::recording::Recording;
use algoviz_runtime::app::ExplorerApp;
use algoviz_runtime::fetch::{FetchOutcome, FetchRequest, FetchToken};
use algoviz_runtime::program::{Cmd, Model};
use algoviz_widgets::viz::{CanvasConfig, VisualizationCanvas};

use crate::{WebError, WebOutputs};

/// Result of a single [`StepProgram::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether a frame was rendered during this step.
    pub rendered: bool,
    /// Messages applied during this step.
    pub messages_processed: u32,
    /// Frames rendered so far.
    pub frame_idx: u64,
}

/// Host-driven, non-blocking program runner.
pub struct StepProgram<M: Model> {
    model: M,
    surface: Recording,
    queue: VecDeque<M::Message>,
    outputs: WebOutputs,
    initialized: bool,
    dirty: bool,
    frame_idx: u64,
}

impl StepProgram<ExplorerApp> {
    /// The explorer, drawing on a canvas described by `config`.
    pub fn explorer(config: CanvasConfig) -> Self {
        let (width, height) = (config.size.width, config.size.height);
        let metrics = config.metrics;
        Self::with_metrics(
            ExplorerApp::new(VisualizationCanvas::new(config)),
            width,
            height,
            metrics,
        )
    }
}

impl<M: Model> StepProgram<M> {
    /// Create a runner with the given canvas size and default font metrics.
    #[must_use]
    pub fn new(model: M, width: u32, height: u32) -> Self {
        Self::with_metrics(model, width, height, MonospaceMetrics::default())
    }

    /// Create a runner whose text measurement matches the host canvas font.
    #[must_use]
    pub fn with_metrics(model: M, width: u32, height: u32, metrics: MonospaceMetrics) -> Self {
        Self {
            model,
            surface: Recording::with_metrics(width, height, metrics),
            queue: VecDeque::new(),
            outputs: WebOutputs::default(),
            initialized: false,
            dirty: true,
            frame_idx: 0,
        }
    }

    /// Initialize the model and render the first frame.
    pub fn init(&mut self) -> Result<(), WebError> {
        if self.initialized {
            return Err(WebError::AlreadyInitialized);
        }
        self.initialized = true;
        let cmd = self.model.init();
        self.execute_cmd(cmd);
        self.render_frame();
        Ok(())
    }

    /// Apply every queued message, then render if anything changed.
    pub fn step(&mut self) -> Result<StepResult, WebError> {
        if !self.initialized {
            return Err(WebError::NotInitialized);
        }

        let mut messages_processed: u32 = 0;
        while let Some(msg) = self.queue.pop_front() {
            messages_processed += 1;
            let cmd = self.model.update(msg);
            self.dirty = true;
            self.execute_cmd(cmd);
        }

        let rendered = self.dirty;
        if rendered {
            self.render_frame();
        }

        Ok(StepResult {
            rendered,
            messages_processed,
            frame_idx: self.frame_idx,
        })
    }

    /// Queue a message for the next [`step`](Self::step).
    pub fn push_message(&mut self, msg: M::Message) {
        self.queue.push_back(msg);
    }

    /// Queue a completed fetch.
    pub fn push_outcome(&mut self, outcome: FetchOutcome) {
        self.push_message(M::Message::from(outcome));
    }

    /// Queue the catalog response body. Malformed JSON becomes a catalog
    /// failure, which the model shows to the user.
    pub fn push_catalog_json(&mut self, body: &str) -> Result<(), WebError> {
        self.ensure_initialized()?;
        self.push_outcome(FetchOutcome::catalog(Catalog::from_json(body)));
        Ok(())
    }

    /// Queue a sample response body for the token the host was given.
    ///
    /// A malformed body counts as a failed sample fetch. A malformed token
    /// is a host bug and is returned as an error.
    pub fn push_sample_json(&mut self, token_json: &str, body: &str) -> Result<(), WebError> {
        self.ensure_initialized()?;
        let token: FetchToken = serde_json::from_str(token_json)?;
        self.push_outcome(FetchOutcome::sample(token, SampleRun::from_json(body)));
        Ok(())
    }

    /// Queue a failed fetch (network error, non-2xx status).
    pub fn push_fetch_failed(&mut self, request: FetchRequest, error: impl Into<String>) {
        let error = error.into();
        let outcome = match request {
            FetchRequest::Catalog => FetchOutcome::Catalog(Err(error)),
            FetchRequest::Sample { token } => FetchOutcome::Sample {
                token,
                result: Err(error),
            },
        };
        self.push_outcome(outcome);
    }

    /// Change the canvas size; the next step repaints.
    pub fn resize(&mut self, width: u32, height: u32) {
        let metrics = self.surface.metrics();
        self.surface = Recording::with_metrics(width, height, metrics);
        self.dirty = true;
    }

    /// Take the accumulated outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> WebOutputs {
        std::mem::take(&mut self.outputs)
    }

    /// Read the accumulated outputs without consuming them.
    pub fn outputs(&self) -> &WebOutputs {
        &self.outputs
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    /// Messages waiting for the next step.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    // --- Private helpers ---

    fn ensure_initialized(&self) -> Result<(), WebError> {
        if self.initialized {
            Ok(())
        } else {
            Err(WebError::NotInitialized)
        }
    }

    fn render_frame(&mut self) {
        self.surface.take_ops();
        self.model.view(&mut self.surface);
        self.outputs.ops = Some(self.surface.take_ops());
        self.dirty = false;
        self.frame_idx += 1;
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
            Cmd::Msg(m) => {
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Log(text) => self.outputs.logs.push(text),
            Cmd::Fetch(request) => self.outputs.fetches.push(request),
        }
    }
}

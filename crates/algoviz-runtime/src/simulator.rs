#![forbid(unsafe_code)]

//! Deterministic program simulator.
//!
//! `ProgramSimulator` runs a [`Model`] with no browser and no I/O of its own.
//! Fetch commands are queued instead of executed, so a test decides when and
//! in which order each one resolves, which is how out-of-order sample
//! arrivals are reproduced.
//!
//! # Example
//!
//! ```
//! use algoviz_core::catalog::{Catalog, SampleRun};
//! use algoviz_runtime::{ExplorerApp, MemorySource, ProgramSimulator};
//!
//! let catalog = Catalog::from_json(r#"[{"name": "sieve", "category": "c",
//!     "summary": "s", "description": "d", "complexity": "O(n)"}]"#).unwrap();
//! let source = MemorySource::new(catalog).with_sample("sieve", SampleRun::default());
//!
//! let mut sim = ProgramSimulator::new(ExplorerApp::default());
//! sim.init();
//! sim.resolve_all(&source);
//! assert_eq!(sim.model().state().selected_name(), Some("sieve"));
//! assert!(sim.pending().is_empty());
//! ```

use std::collections::VecDeque;

use algoviz_render::recording::Recording;
use algoviz_render::Surface;
use tracing::trace;

use crate::fetch::{FetchOutcome, FetchRequest};
use crate::program::{Cmd, Model};
use crate::source::{CatalogSource, SampleSource};

/// Record of a command executed during simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum CmdRecord {
    None,
    /// Message fed back into the model (not stored).
    Msg,
    /// Batch of the given length.
    Batch(usize),
    Log(String),
    /// Fetch queued for later resolution.
    Fetch(FetchRequest),
}

/// Deterministic driver for a [`Model`].
pub struct ProgramSimulator<M: Model> {
    model: M,
    pending: VecDeque<FetchRequest>,
    frames: Vec<Recording>,
    command_log: Vec<CmdRecord>,
    logs: Vec<String>,
}

impl<M: Model> ProgramSimulator<M> {
    /// Wrap a model. It is not initialized until [`init`](Self::init).
    pub fn new(model: M) -> Self {
        Self {
            model,
            pending: VecDeque::new(),
            frames: Vec::new(),
            command_log: Vec::new(),
            logs: Vec::new(),
        }
    }

    /// Run `Model::init` and execute its commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Dispatch a message and execute the returned commands.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Dispatch several messages in order.
    pub fn send_all(&mut self, msgs: impl IntoIterator<Item = M::Message>) {
        for msg in msgs {
            self.send(msg);
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Fetches issued but not yet resolved, oldest first.
    pub fn pending(&self) -> &VecDeque<FetchRequest> {
        &self.pending
    }

    /// Deliver a fetch result.
    ///
    /// The matching pending request, if any, is removed. The outcome is
    /// delivered even when nothing was pending, which is how a host would
    /// see a duplicate or late response.
    pub fn complete(&mut self, outcome: FetchOutcome) {
        let request = outcome.request();
        if let Some(pos) = self.pending.iter().position(|r| *r == request) {
            self.pending.remove(pos);
        }
        trace!(?request, "fetch completed");
        self.send(M::Message::from(outcome));
    }

    /// Resolve the oldest pending fetch from `source`.
    ///
    /// Returns `false` when nothing was pending.
    pub fn resolve_next<S>(&mut self, source: &S) -> bool
    where
        S: CatalogSource + SampleSource + ?Sized,
    {
        let Some(request) = self.pending.front().cloned() else {
            return false;
        };
        self.complete(Self::load(source, request));
        true
    }

    /// Resolve pending fetches oldest first until none remain, including
    /// fetches issued while resolving.
    pub fn resolve_all<S>(&mut self, source: &S)
    where
        S: CatalogSource + SampleSource + ?Sized,
    {
        while self.resolve_next(source) {}
    }

    fn load<S>(source: &S, request: FetchRequest) -> FetchOutcome
    where
        S: CatalogSource + SampleSource + ?Sized,
    {
        match request {
            FetchRequest::Catalog => FetchOutcome::catalog(source.load_catalog()),
            FetchRequest::Sample { token } => {
                let result = source.load_sample(&token.name);
                FetchOutcome::sample(token, result)
            }
        }
    }

    /// Render the current view onto `surface`.
    pub fn render_to(&self, surface: &mut dyn Surface) {
        self.model.view(surface);
    }

    /// Render the current view into a fresh recording and keep it.
    pub fn capture_frame(&mut self, width: u32, height: u32) -> &Recording {
        let mut frame = Recording::new(width, height);
        self.model.view(&mut frame);
        self.frames.push(frame);
        let last = self.frames.len() - 1;
        &self.frames[last]
    }

    pub fn frames(&self) -> &[Recording] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Recording> {
        self.frames.last()
    }

    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    /// Lines emitted through `Cmd::Log`.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Log(text) => {
                self.command_log.push(CmdRecord::Log(text.clone()));
                self.logs.push(text);
            }
            Cmd::Fetch(request) => {
                self.command_log.push(CmdRecord::Fetch(request.clone()));
                self.pending.push_back(request);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{ExplorerApp, Msg};
    use crate::fetch::FetchToken;
    use crate::source::MemorySource;
    use algoviz_core::catalog::{Catalog, SampleRun};

    fn source() -> MemorySource {
        let catalog = Catalog::from_json(
            r#"[{"name": "a", "category": "c", "summary": "s", "description": "d", "complexity": "O(1)"},
                {"name": "b", "category": "c", "summary": "s", "description": "d", "complexity": "O(1)"}]"#,
        )
        .unwrap();
        MemorySource::new(catalog)
            .with_sample("a", SampleRun::from_json(r#"{"output": {"result": [1, 2]}}"#).unwrap())
    }

    #[test]
    fn init_queues_catalog_fetch() {
        let mut sim = ProgramSimulator::new(ExplorerApp::default());
        sim.init();
        assert_eq!(sim.pending().front(), Some(&FetchRequest::Catalog));
        assert_eq!(sim.command_log(), &[CmdRecord::Fetch(FetchRequest::Catalog)]);
    }

    #[test]
    fn resolve_all_follows_up_sample_fetch() {
        let mut sim = ProgramSimulator::new(ExplorerApp::default());
        sim.init();
        sim.resolve_all(&source());
        assert!(sim.pending().is_empty());
        assert_eq!(sim.model().state().chart().len(), 2);
    }

    #[test]
    fn missing_sample_degrades_silently() {
        let mut sim = ProgramSimulator::new(ExplorerApp::default());
        sim.init();
        sim.resolve_all(&source());
        sim.send(Msg::Select("b".into()));
        sim.resolve_all(&source());
        assert!(sim.model().state().sample().is_none());
        assert!(sim.logs().is_empty());
    }

    #[test]
    fn complete_out_of_order() {
        let mut sim = ProgramSimulator::new(ExplorerApp::default());
        sim.init();
        sim.resolve_next(&source());
        sim.send(Msg::Select("b".into()));
        assert_eq!(sim.pending().len(), 2);

        sim.complete(FetchOutcome::Sample {
            token: FetchToken::new(2, "b"),
            result: Err("offline".into()),
        });
        assert_eq!(sim.pending().len(), 1);
        sim.resolve_all(&source());
        assert_eq!(sim.model().state().selected_name(), Some("b"));
        assert!(sim.model().state().chart().is_none());
    }

    #[test]
    fn catalog_failure_is_logged() {
        let mut sim = ProgramSimulator::new(ExplorerApp::default());
        sim.init();
        sim.complete(FetchOutcome::catalog(Err::<Catalog, _>("timeout")));
        assert_eq!(sim.logs(), &["Failed to load metadata: timeout".to_string()]);
        assert!(sim.pending().is_empty());
    }

    #[test]
    fn frames_are_kept() {
        let mut sim = ProgramSimulator::new(ExplorerApp::default());
        sim.init();
        sim.resolve_all(&source());
        assert!(sim.capture_frame(800, 260).is_empty());
        sim.send(Msg::SetTab(crate::app::Tab::Visualization));
        assert!(!sim.capture_frame(800, 260).is_empty());
        assert_eq!(sim.frames().len(), 2);
    }
}

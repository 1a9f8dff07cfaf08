#![forbid(unsafe_code)]

//! Explorer runtime.
//!
//! The explorer is an Elm-style program: [`app::ExplorerApp`] owns one
//! [`app::ExplorerState`], every input arrives as an [`app::Msg`], and side
//! effects (catalog and sample fetches) leave `update` as [`program::Cmd`]s
//! for the host to execute. Hosts are the [`simulator::ProgramSimulator`]
//! (tests and the command-line explorer) and the browser step program.

pub mod app;
pub mod fetch;
pub mod program;
pub mod simulator;
pub mod source;

pub use app::{ExplorerApp, ExplorerState, LoadPhase, Msg, Tab};
pub use fetch::{FetchOutcome, FetchRequest, FetchToken};
pub use program::{Cmd, Model};
pub use simulator::ProgramSimulator;
pub use source::{CatalogSource, DirSource, LoadError, MemorySource, SampleSource};

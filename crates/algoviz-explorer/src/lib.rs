#![forbid(unsafe_code)]

//! Headless command-line explorer.
//!
//! Loads a catalog directory, drives the explorer program through the
//! simulator, prints the panel text for one algorithm and tab, and can
//! export the visualization canvas as a PNG.

pub mod cli;
pub mod logging;
pub mod run;

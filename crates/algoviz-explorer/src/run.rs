#![forbid(unsafe_code)]

//! One explorer session: load, select, print, export.

use std::fmt;
use std::io::{self, Write};

use algoviz_render::export::{ExportError, write_png};
use algoviz_runtime::{DirSource, ExplorerApp, LoadPhase, Msg, ProgramSimulator};
use algoviz_widgets::panels;
use algoviz_widgets::viz::VisualizationCanvas;
use tracing::{debug, info, info_span};

use crate::cli::Opts;

/// Reasons a session ends unsuccessfully.
#[derive(Debug)]
pub enum RunError {
    /// The catalog could not be loaded; carries the banner text.
    Catalog(String),
    /// `--algorithm` names nothing in the catalog.
    UnknownAlgorithm(String),
    /// PNG export failed.
    Export(ExportError),
    /// Writing panel text failed.
    Io(io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Catalog(banner) => f.write_str(banner),
            RunError::UnknownAlgorithm(name) => write!(f, "Unknown algorithm: {name}"),
            RunError::Export(e) => write!(f, "PNG export failed: {e}"),
            RunError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Export(e) => Some(e),
            RunError::Io(e) => Some(e),
            RunError::Catalog(_) | RunError::UnknownAlgorithm(_) => None,
        }
    }
}

impl From<ExportError> for RunError {
    fn from(e: ExportError) -> Self {
        RunError::Export(e)
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        RunError::Io(e)
    }
}

/// Run one session, writing panel text to `out`.
///
/// With `--list` only the sidebar is printed. Otherwise the chosen
/// algorithm's header, tab bar and tab body are printed, and the canvas is
/// exported when `--png` is set, whatever tab was printed.
pub fn run<W: Write + ?Sized>(opts: &Opts, out: &mut W) -> Result<(), RunError> {
    let _span = info_span!("explorer_run", data_dir = %opts.data_dir.display()).entered();
    let source = DirSource::new(&opts.data_dir);
    let canvas = VisualizationCanvas::new(opts.canvas_config());
    let mut sim = ProgramSimulator::new(ExplorerApp::new(canvas));

    sim.init();
    // The catalog fetch is the only one pending after init.
    sim.resolve_next(&source);
    if let LoadPhase::Failed(message) = sim.model().state().phase() {
        return Err(RunError::Catalog(panels::error_banner(message)));
    }

    if opts.list {
        for line in sim.model().sidebar_lines() {
            writeln!(out, "{line}")?;
        }
        return Ok(());
    }

    if let Some(name) = &opts.algorithm {
        if sim.model().state().catalog().get(name).is_none() {
            return Err(RunError::UnknownAlgorithm(name.clone()));
        }
        sim.send(Msg::Select(name.clone()));
    }
    // Earlier samples are stale by now and get discarded on arrival.
    sim.resolve_all(&source);
    sim.send(Msg::SetTab(opts.tab));

    let state = sim.model().state();
    info!(
        algorithm = state.selected_name().unwrap_or_default(),
        tab = %state.tab(),
        chart = state.chart().kind(),
        "session ready"
    );
    for line in sim.model().content_lines() {
        writeln!(out, "{line}")?;
    }

    if let Some(path) = &opts.png
        && let Some(meta) = state.selected()
    {
        let app = sim.model();
        let mut pixmap = app.canvas().config().pixmap();
        app.canvas().render(&mut pixmap, meta, state.chart());
        write_png(&pixmap, path)?;
        debug!(path = %path.display(), "canvas exported");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_catalog(dir: &Path) {
        fs::write(
            dir.join("algorithms.json"),
            r#"[{"name": "sieve", "category": "sieves", "summary": "Classic sieve",
                 "description": "Cross out multiples.", "complexity": "O(n log log n)",
                 "visualization": {"mode": "bars", "steps": "Cross out multiples"}},
                {"name": "trial", "category": "basic", "summary": "Divide",
                 "description": "Try divisors.", "complexity": "O(sqrt n)"}]"#,
        )
        .unwrap();
    }

    fn opts(dir: &Path) -> Opts {
        Opts {
            data_dir: dir.to_path_buf(),
            ..Opts::default()
        }
    }

    fn output(opts: &Opts) -> Result<String, RunError> {
        let mut out = Vec::new();
        run(opts, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn missing_catalog_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = output(&opts(dir.path())).unwrap_err();
        assert!(matches!(err, RunError::Catalog(_)));
        assert!(err.to_string().starts_with("Failed to load metadata: "));
    }

    #[test]
    fn first_algorithm_by_default() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path());
        let text = output(&opts(dir.path())).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.contains(&"sieve"));
        assert!(lines.contains(&"Complexity: O(n log log n)"));
        assert!(lines.contains(&"No parameters documented."));
    }

    #[test]
    fn unknown_algorithm() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path());
        let mut o = opts(dir.path());
        o.algorithm = Some("bogus".into());
        let err = output(&o).unwrap_err();
        assert_eq!(err.to_string(), "Unknown algorithm: bogus");
    }

    #[test]
    fn list_prints_sidebar() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path());
        let mut o = opts(dir.path());
        o.list = true;
        let text = output(&o).unwrap();
        assert!(text.contains("sieve"));
        assert!(text.contains("trial"));
        assert!(!text.contains("Complexity:"));
    }
}

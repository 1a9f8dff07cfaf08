#![forbid(unsafe_code)]

//! The explorer model.
//!
//! [`ExplorerState`] is the single piece of mutable view state: catalog,
//! selection, active tab, the selected algorithm's sample and its chart.
//! All changes go through its transition methods, and [`ExplorerApp`] maps
//! messages onto those transitions and the fetches they imply.
//!
//! Stale samples: every selection bumps a generation counter and issues a
//! [`FetchToken`] carrying it. A resolution is applied only when its token
//! matches the current generation and selection, so a slow fetch for an
//! earlier selection can never overwrite a newer one.

use std::fmt;
use std::str::FromStr;

use algoviz_core::catalog::{AlgorithmDescriptor, Catalog, SampleRun};
use algoviz_render::Surface;
use algoviz_widgets::chart_data::{ChartData, classify_optional};
use algoviz_widgets::panels;
use algoviz_widgets::viz::VisualizationCanvas;
use tracing::{debug, info, warn};

use crate::fetch::{FetchOutcome, FetchRequest, FetchToken};
use crate::program::{Cmd, Model};

/// Tabs of the content pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Overview,
    Docs,
    Visualization,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Docs, Tab::Visualization];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Docs => "Docs",
            Tab::Visualization => "Visualization",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Overview => 0,
            Tab::Docs => 1,
            Tab::Visualization => 2,
        }
    }

    /// Next tab, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unrecognized tab name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTabError(pub String);

impl fmt::Display for ParseTabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown tab '{}' (expected overview, docs or visualization)",
            self.0
        )
    }
}

impl std::error::Error for ParseTabError {}

impl FromStr for Tab {
    type Err = ParseTabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(Tab::Overview),
            "docs" => Ok(Tab::Docs),
            "visualization" | "viz" => Ok(Tab::Visualization),
            _ => Err(ParseTabError(s.to_string())),
        }
    }
}

/// Where the catalog load stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Ready,
    /// Loading failed; the view shows only the error.
    Failed(String),
}

/// Explorer messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    CatalogLoaded(Catalog),
    CatalogFailed(String),
    /// Select an algorithm by name.
    Select(String),
    SetTab(Tab),
    NextTab,
    PrevTab,
    SampleResolved {
        token: FetchToken,
        result: Result<SampleRun, String>,
    },
}

impl From<FetchOutcome> for Msg {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Catalog(Ok(catalog)) => Msg::CatalogLoaded(catalog),
            FetchOutcome::Catalog(Err(e)) => Msg::CatalogFailed(e),
            FetchOutcome::Sample { token, result } => Msg::SampleResolved { token, result },
        }
    }
}

/// All explorer view state.
#[derive(Debug, Clone, Default)]
pub struct ExplorerState {
    catalog: Catalog,
    phase: LoadPhase,
    selected: Option<String>,
    tab: Tab,
    sample: Option<SampleRun>,
    chart: ChartData,
    generation: u64,
    pending: Option<FetchToken>,
    dirty: bool,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Descriptor of the current selection.
    pub fn selected(&self) -> Option<&AlgorithmDescriptor> {
        self.selected
            .as_deref()
            .and_then(|name| self.catalog.get(name))
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn sample(&self) -> Option<&SampleRun> {
        self.sample.as_ref()
    }

    pub fn chart(&self) -> &ChartData {
        &self.chart
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Token of the sample fetch still awaited, if any.
    pub fn pending(&self) -> Option<&FetchToken> {
        self.pending.as_ref()
    }

    /// Whether the canvas should be drawn: catalog ready, something
    /// selected, and the visualization tab active.
    pub fn is_rendering(&self) -> bool {
        self.phase == LoadPhase::Ready
            && self.selected().is_some()
            && self.tab == Tab::Visualization
    }

    /// Whether anything visible changed since the last [`take_dirty`].
    ///
    /// [`take_dirty`]: Self::take_dirty
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and reset the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Install a loaded catalog.
    ///
    /// Keeps an existing selection if the new catalog still has it,
    /// otherwise selects the first descriptor. Returns the sample fetch to
    /// issue, if a selection was made.
    pub fn catalog_loaded(&mut self, catalog: Catalog) -> Option<FetchToken> {
        self.catalog = catalog;
        self.phase = LoadPhase::Ready;
        self.dirty = true;

        if self.selected().is_some() {
            return None;
        }
        self.selected = None;
        let first = self.catalog.first()?.name.clone();
        self.select(&first)
    }

    /// Enter the failed state. Selection and chart are cleared so nothing
    /// stale stays on screen.
    pub fn catalog_failed(&mut self, message: impl Into<String>) {
        self.phase = LoadPhase::Failed(message.into());
        self.catalog = Catalog::default();
        self.selected = None;
        self.sample = None;
        self.chart = ChartData::None;
        self.pending = None;
        self.generation += 1;
        self.dirty = true;
    }

    /// Select an algorithm.
    ///
    /// Resets the tab to Overview, drops the previous sample, and returns
    /// the token of the new sample fetch. Unknown names are ignored.
    /// Re-selecting the current algorithm fetches its sample again.
    pub fn select(&mut self, name: &str) -> Option<FetchToken> {
        if self.catalog.get(name).is_none() {
            warn!(name, "ignoring selection of unknown algorithm");
            return None;
        }

        self.generation += 1;
        self.selected = Some(name.to_string());
        self.tab = Tab::Overview;
        self.sample = None;
        self.chart = ChartData::None;
        self.dirty = true;

        let token = FetchToken::new(self.generation, name);
        self.pending = Some(token.clone());
        Some(token)
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.dirty = true;
        }
    }

    /// Whether a resolution carrying `token` would be applied.
    pub fn is_current(&self, token: &FetchToken) -> bool {
        token.generation == self.generation && self.selected.as_deref() == Some(token.name.as_str())
    }

    /// Apply a sample fetch result.
    ///
    /// Stale tokens are discarded and `false` is returned. A failed fetch
    /// counts as "no sample".
    pub fn resolve_sample(&mut self, token: &FetchToken, result: Result<SampleRun, String>) -> bool {
        if !self.is_current(token) {
            debug!(%token, current = self.generation, "discarding stale sample");
            return false;
        }

        self.sample = match result {
            Ok(sample) => Some(sample),
            Err(e) => {
                debug!(%token, error = %e, "sample unavailable");
                None
            }
        };
        self.chart = classify_optional(self.sample.as_ref());
        self.pending = None;
        self.dirty = true;
        true
    }
}

/// The explorer program.
#[derive(Debug, Clone, Default)]
pub struct ExplorerApp {
    state: ExplorerState,
    canvas: VisualizationCanvas,
}

impl ExplorerApp {
    pub fn new(canvas: VisualizationCanvas) -> Self {
        Self {
            state: ExplorerState::new(),
            canvas,
        }
    }

    pub fn state(&self) -> &ExplorerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ExplorerState {
        &mut self.state
    }

    pub fn canvas(&self) -> &VisualizationCanvas {
        &self.canvas
    }

    /// Sidebar text.
    pub fn sidebar_lines(&self) -> Vec<String> {
        panels::sidebar_lines(self.state.catalog(), self.state.selected_name())
    }

    /// Content pane text for the current phase and tab.
    pub fn content_lines(&self) -> Vec<String> {
        let state = &self.state;
        if let LoadPhase::Failed(message) = state.phase() {
            return vec![panels::error_banner(message)];
        }
        let Some(meta) = state.selected() else {
            return vec![panels::LOADING_TEXT.to_string()];
        };

        let mut lines = panels::header_lines(meta);
        let labels = Tab::ALL.map(Tab::label);
        lines.push(panels::tab_bar(&labels, state.tab().index()));
        lines.push(String::new());
        lines.extend(match state.tab() {
            Tab::Overview => panels::overview_lines(meta),
            Tab::Docs => panels::docs_lines(meta),
            Tab::Visualization => panels::details_lines(meta, state.sample(), state.chart()),
        });
        lines
    }

    fn sample_fetch(token: Option<FetchToken>) -> Cmd<Msg> {
        token.map_or(Cmd::none(), |t| Cmd::fetch(FetchRequest::sample(t)))
    }
}

impl Model for ExplorerApp {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        Cmd::fetch(FetchRequest::Catalog)
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::CatalogLoaded(catalog) => {
                info!(entries = catalog.len(), "catalog ready");
                Self::sample_fetch(self.state.catalog_loaded(catalog))
            }
            Msg::CatalogFailed(message) => {
                warn!(error = %message, "catalog failed to load");
                let banner = panels::error_banner(&message);
                self.state.catalog_failed(message);
                Cmd::log(banner)
            }
            Msg::Select(name) => Self::sample_fetch(self.state.select(&name)),
            Msg::SetTab(tab) => {
                self.state.set_tab(tab);
                Cmd::none()
            }
            Msg::NextTab => {
                self.state.set_tab(self.state.tab().next());
                Cmd::none()
            }
            Msg::PrevTab => {
                self.state.set_tab(self.state.tab().prev());
                Cmd::none()
            }
            Msg::SampleResolved { token, result } => {
                self.state.resolve_sample(&token, result);
                Cmd::none()
            }
        }
    }

    fn view(&self, surface: &mut dyn Surface) {
        if !self.state.is_rendering() {
            return;
        }
        if let Some(meta) = self.state.selected() {
            self.canvas.render(surface, meta, self.state.chart());
        }
    }
}

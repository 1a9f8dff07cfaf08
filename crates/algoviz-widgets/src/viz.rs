#![forbid(unsafe_code)]

//! The visualization canvas.
//!
//! [`VisualizationCanvas::render`] repaints a whole frame, always in the same
//! order:
//!
//! 1. clear the surface and fill the background;
//! 2. draw the header naming the visualization mode (`N/A` without a hint);
//! 3. wrap the hint's steps below the header, or a placeholder sentence;
//! 4. draw the chart for the current [`ChartData`], if any.
//!
//! There is no incremental redraw: every call starts from a cleared surface,
//! so rendering the same inputs twice yields the same frame.

use algoviz_core::catalog::AlgorithmDescriptor;
use algoviz_core::geometry::{Point, Size};
use algoviz_render::metrics::MonospaceMetrics;
use algoviz_render::pixmap::Pixmap;
use algoviz_render::recording::Recording;
use algoviz_render::Surface;
use algoviz_text::wrap::{WrapBox, draw_wrapped};

use crate::Widget;
use crate::bars::BarChart;
use crate::chart_data::ChartData;
use crate::metrics::MetricBars;
use crate::theme::Theme;

/// Header mode shown when a descriptor has no visualization hint.
pub const NO_HINT_MODE: &str = "N/A";

/// Instructions shown when a descriptor has no steps text.
pub const PLACEHOLDER_STEPS: &str = "No steps provided. Add visualization metadata to see more.";

/// Canvas size, font, palette and text placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    pub size: Size,
    pub metrics: MonospaceMetrics,
    pub theme: Theme,
    /// Left inset shared by text and charts.
    pub margin: f64,
    /// Baseline of the header line.
    pub header_baseline: f64,
    /// Baseline of the first instruction line.
    pub steps_baseline: f64,
    /// Distance between instruction baselines.
    pub line_height: f64,
}

impl CanvasConfig {
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 260;

    /// Same layout at a different size.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// A raster surface sized and fonted for this canvas.
    pub fn pixmap(&self) -> Pixmap {
        Pixmap::with_metrics(self.size.width, self.size.height, self.metrics)
    }

    /// A recording surface sized and fonted for this canvas.
    pub fn recording(&self) -> Recording {
        Recording::with_metrics(self.size.width, self.size.height, self.metrics)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: Size::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT),
            metrics: MonospaceMetrics::default(),
            theme: Theme::default(),
            margin: 16.0,
            header_baseline: 32.0,
            steps_baseline: 60.0,
            line_height: 20.0,
        }
    }
}

/// Header text for a descriptor.
pub fn header_text(descriptor: &AlgorithmDescriptor) -> String {
    let mode = descriptor.visualization_mode().unwrap_or(NO_HINT_MODE);
    format!("Visualization hint: {mode}")
}

/// Instruction text for a descriptor.
pub fn instructions(descriptor: &AlgorithmDescriptor) -> &str {
    descriptor
        .visualization_steps()
        .unwrap_or(PLACEHOLDER_STEPS)
}

/// Draws one algorithm's visualization frame.
#[derive(Debug, Clone, Default)]
pub struct VisualizationCanvas {
    config: CanvasConfig,
}

impl VisualizationCanvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Repaint `surface` for `descriptor` and its chart data.
    ///
    /// Layout follows the surface's own size, so a surface of a different
    /// size than the config still gets a consistent frame.
    pub fn render(
        &self,
        surface: &mut dyn Surface,
        descriptor: &AlgorithmDescriptor,
        chart: &ChartData,
    ) {
        let cfg = &self.config;
        let theme = &cfg.theme;
        let area = surface.bounds();

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "canvas_render",
            algorithm = %descriptor.name,
            chart = chart.kind(),
            width = area.width,
            height = area.height
        )
        .entered();

        surface.clear();
        surface.fill(theme.background);

        surface.fill_text(
            &header_text(descriptor),
            Point::new(area.x + cfg.margin, area.y + cfg.header_baseline),
            theme.accent,
        );

        let column = area.inset(cfg.margin, 0.0);
        let steps_box = WrapBox::new(
            Point::new(column.x, area.y + cfg.steps_baseline),
            column.width,
        )
        .line_height(cfg.line_height);
        draw_wrapped(surface, instructions(descriptor), &steps_box, theme.accent);

        match chart {
            ChartData::List { values } => BarChart::new(values)
                .color(theme.bar)
                .margin(cfg.margin)
                .render(area, surface),
            ChartData::Metrics { entries } => {
                MetricBars::new(entries).theme(theme).render(area, surface)
            }
            ChartData::None => {}
        }
    }
}

#![forbid(unsafe_code)]

//! Chart widgets and the visualization canvas.
//!
//! The pipeline is: a [`SampleRun`](algoviz_core::catalog::SampleRun) is
//! normalized by [`chart_data::classify`] into a [`ChartData`], and
//! [`viz::VisualizationCanvas`] repaints a surface from a descriptor plus that
//! chart data, delegating to [`bars::BarChart`] or [`metrics::MetricBars`].

pub mod bars;
pub mod chart_data;
pub mod metrics;
pub mod panels;
pub mod theme;
pub mod viz;

use algoviz_core::geometry::Rect;
use algoviz_render::Surface;

pub use chart_data::{ChartData, MetricEntry, classify};
pub use viz::{CanvasConfig, VisualizationCanvas};

/// A `Widget` draws itself into an area of a surface.
///
/// Widgets are stateless views over borrowed data; rendering the same widget
/// twice onto a cleared surface produces the same draw calls.
pub trait Widget {
    /// Draw into `area`. Implementations must not draw when there is
    /// nothing to show.
    fn render(&self, area: Rect, surface: &mut dyn Surface);
}

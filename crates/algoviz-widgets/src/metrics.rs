#![forbid(unsafe_code)]

//! Horizontal comparison bars for labeled metrics.
//!
//! Each entry occupies a row: a full-width track, a fill scaled against the
//! largest entry, and a `label: value` caption just above the track. Rows
//! start at `top` and step down by `row_stride`.

use algoviz_core::geometry::{Point, Rect};
use algoviz_render::{PackedRgba, Surface};

use crate::Widget;
use crate::chart_data::MetricEntry;
use crate::theme::Theme;

/// Geometry and caption for one metric row.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub track: Rect,
    pub fill: Rect,
    pub caption: String,
    pub caption_origin: Point,
}

/// Format a metric caption with two decimals.
pub fn caption(entry: &MetricEntry) -> String {
    format!("{}: {:.2}", entry.label, entry.value)
}

/// Metric bars over borrowed entries.
#[derive(Debug, Clone)]
pub struct MetricBars<'a> {
    entries: &'a [MetricEntry],
    track_color: PackedRgba,
    fill_color: PackedRgba,
    label_color: PackedRgba,
    margin: f64,
    top: f64,
    row_stride: f64,
    track_height: f64,
    caption_lift: f64,
}

impl<'a> MetricBars<'a> {
    pub fn new(entries: &'a [MetricEntry]) -> Self {
        let theme = Theme::SLATE;
        Self {
            entries,
            track_color: theme.track,
            fill_color: theme.fill,
            label_color: theme.label,
            margin: 16.0,
            top: 120.0,
            row_stride: 50.0,
            track_height: 24.0,
            caption_lift: 8.0,
        }
    }

    /// Take track, fill and label colors from a theme.
    #[must_use]
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.track_color = theme.track;
        self.fill_color = theme.fill;
        self.label_color = theme.label;
        self
    }

    /// Set the vertical position of the first row.
    #[must_use]
    pub fn top(mut self, top: f64) -> Self {
        self.top = top;
        self
    }

    /// Lay out every row inside `area`, in entry order.
    pub fn layout(&self, area: Rect) -> Vec<MetricRow> {
        let max = self
            .entries
            .iter()
            .map(|e| e.value)
            .fold(f64::NEG_INFINITY, f64::max);
        let lane = area.inset(self.margin, 0.0);
        let (left, track_width) = (lane.x, lane.width);

        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let y = area.y + self.top + i as f64 * self.row_stride;
                let ratio = entry.value / max;
                let ratio = if ratio.is_finite() { ratio } else { 0.0 };
                MetricRow {
                    track: Rect::new(left, y, track_width, self.track_height),
                    fill: Rect::new(left, y, track_width * ratio, self.track_height),
                    caption: caption(entry),
                    caption_origin: Point::new(left, y - self.caption_lift),
                }
            })
            .collect()
    }
}

impl Widget for MetricBars<'_> {
    fn render(&self, area: Rect, surface: &mut dyn Surface) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "MetricBars",
            rows = self.entries.len(),
            width = area.width
        )
        .entered();

        for row in self.layout(area) {
            surface.fill_rect(row.track, self.track_color);
            surface.fill_rect(row.fill, self.fill_color);
            surface.fill_text(&row.caption, row.caption_origin, self.label_color);
        }
    }
}

#![forbid(unsafe_code)]

//! Vertical bar chart for a list of values.
//!
//! Bars share the area width evenly after a horizontal margin, rise from a
//! baseline `baseline_pad` above the bottom edge, and are scaled so the
//! largest value reaches `area.height - headroom`. Values are drawn in input
//! order and never sorted.
//!
//! # Example
//!
//! ```
//! use algoviz_core::geometry::Rect;
//! use algoviz_widgets::bars::BarChart;
//!
//! let values = [1.0, 2.0, 4.0];
//! let bars = BarChart::new(&values).layout(Rect::new(0.0, 0.0, 800.0, 260.0));
//! assert_eq!(bars.len(), 3);
//! assert_eq!(bars[2].height, 180.0);
//! ```

use algoviz_core::geometry::Rect;
use algoviz_render::{PackedRgba, Surface};

use crate::Widget;
use crate::theme::Theme;

/// A bar chart over borrowed values.
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    values: &'a [f64],
    color: PackedRgba,
    margin: f64,
    baseline_pad: f64,
    headroom: f64,
    gap: f64,
    min_bar_width: f64,
}

impl<'a> BarChart<'a> {
    /// Create a chart with the default canvas layout.
    pub fn new(values: &'a [f64]) -> Self {
        Self {
            values,
            color: Theme::SLATE.bar,
            margin: 16.0,
            baseline_pad: 20.0,
            headroom: 80.0,
            gap: 4.0,
            min_bar_width: 2.0,
        }
    }

    /// Set the bar color.
    #[must_use]
    pub fn color(mut self, color: PackedRgba) -> Self {
        self.color = color;
        self
    }

    /// Set the left and right margin.
    #[must_use]
    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the space between bars.
    #[must_use]
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    fn max_value(&self) -> f64 {
        self.values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Rectangles the chart fills inside `area`, left to right.
    ///
    /// A value whose ratio to the maximum is not finite (a zero maximum)
    /// gets a zero-height bar sitting on the baseline.
    pub fn layout(&self, area: Rect) -> Vec<Rect> {
        if self.values.is_empty() {
            return Vec::new();
        }

        let max = self.max_value();
        let slot = (area.width - 2.0 * self.margin) / self.values.len() as f64;
        let bar_width = (slot - self.gap).max(self.min_bar_width);
        let baseline = area.bottom() - self.baseline_pad;
        let scale = area.height - self.headroom;

        self.values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let ratio = value / max;
                let height = if ratio.is_finite() { ratio * scale } else { 0.0 };
                Rect::new(
                    area.x + self.margin + i as f64 * slot,
                    baseline - height,
                    bar_width,
                    height,
                )
            })
            .collect()
    }
}

impl Widget for BarChart<'_> {
    fn render(&self, area: Rect, surface: &mut dyn Surface) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "BarChart",
            bars = self.values.len(),
            width = area.width,
            height = area.height
        )
        .entered();

        for bar in self.layout(area) {
            surface.fill_rect(bar, self.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_render::recording::Recording;

    const CANVAS: Rect = Rect::new(0.0, 0.0, 800.0, 260.0);

    #[test]
    fn empty_values_draw_nothing() {
        let mut rec = Recording::new(800, 260);
        BarChart::new(&[]).render(CANVAS, &mut rec);
        assert!(rec.is_empty());
    }

    #[test]
    fn geometry_matches_canvas_layout() {
        let values = [1.0, 2.0, 4.0, 2.0];
        let bars = BarChart::new(&values).layout(CANVAS);
        // 768px shared by 4 bars.
        assert_eq!(bars[0], Rect::new(16.0, 195.0, 188.0, 45.0));
        assert_eq!(bars[1], Rect::new(208.0, 150.0, 188.0, 90.0));
        assert_eq!(bars[2], Rect::new(400.0, 60.0, 188.0, 180.0));
        assert_eq!(bars[3].x, 592.0);
    }

    #[test]
    fn all_zero_values_give_zero_height_bars() {
        let values = [0.0, 0.0, 0.0];
        let mut rec = Recording::new(800, 260);
        BarChart::new(&values).render(CANVAS, &mut rec);
        let rects: Vec<Rect> = rec.rects().collect();
        assert_eq!(rects.len(), 3);
        assert!(rects.iter().all(|r| r.height == 0.0 && r.y == 240.0));
    }

    #[test]
    fn narrow_slots_keep_minimum_width() {
        let values = vec![1.0; 400];
        let bars = BarChart::new(&values).layout(CANVAS);
        assert!(bars.iter().all(|b| b.width == 2.0));
    }

    #[test]
    fn order_is_preserved() {
        let values = [5.0, 1.0, 3.0];
        let bars = BarChart::new(&values).layout(CANVAS);
        let heights: Vec<f64> = bars.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![180.0, 36.0, 108.0]);
        assert!(bars.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn negative_values_hang_below_baseline() {
        let values = [4.0, -2.0];
        let bars = BarChart::new(&values).layout(CANVAS);
        assert_eq!(bars[1].height, -90.0);
        assert_eq!(bars[1].y, 330.0);
    }

    #[test]
    fn uses_configured_color() {
        let values = [1.0];
        let mut rec = Recording::new(800, 260);
        BarChart::new(&values)
            .color(PackedRgba::WHITE)
            .render(CANVAS, &mut rec);
        assert_eq!(rec.rects_with(PackedRgba::WHITE).count(), 1);
    }
}

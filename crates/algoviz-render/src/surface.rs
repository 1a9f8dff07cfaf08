#![forbid(unsafe_code)]

//! The drawing surface contract.
//!
//! A [`Surface`] is the subset of a 2D canvas context the explorer draws
//! with: clear, filled rectangles, filled text, and text measurement.
//! Coordinates are pixels from the top-left corner; text is positioned by
//! its alphabetic baseline, as `fillText` does.

use algoviz_core::geometry::{Point, Rect, Size};

use crate::color::PackedRgba;

/// A fixed-size pixel drawing target.
pub trait Surface {
    /// Surface dimensions in pixels.
    fn size(&self) -> Size;

    /// Reset every pixel to transparent and drop previously drawn content.
    fn clear(&mut self);

    /// Fill a rectangle.
    ///
    /// Negative extents draw toward the opposite edge. Pixels outside the
    /// surface are clipped; empty or non-finite rectangles draw nothing.
    fn fill_rect(&mut self, rect: Rect, paint: PackedRgba);

    /// Draw a single line of text with its baseline at `origin.y`.
    fn fill_text(&mut self, text: &str, origin: Point, paint: PackedRgba);

    /// Advance width of `text` in pixels, in the surface's current font.
    fn measure_text(&self, text: &str) -> f64;

    /// Fill the whole surface.
    fn fill(&mut self, paint: PackedRgba) {
        let area = self.size().to_rect();
        self.fill_rect(area, paint);
    }

    /// Surface bounds as a rectangle at the origin.
    fn bounds(&self) -> Rect {
        self.size().to_rect()
    }
}

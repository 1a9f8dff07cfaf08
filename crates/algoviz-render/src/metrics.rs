#![forbid(unsafe_code)]

//! Text measurement.
//!
//! Layout code never rasterizes glyphs; it only needs the advance width of a
//! string in pixels. [`TextMetrics`] is that hook. Hosts with a real font
//! stack (a browser `measureText`) plug in their own implementation;
//! [`MonospaceMetrics`] is the built-in approximation used by the pixmap and
//! recording surfaces.

use unicode_width::UnicodeWidthStr;

/// Pixel width of rendered text.
pub trait TextMetrics {
    /// Advance width of `text` in pixels.
    fn measure(&self, text: &str) -> f64;

    /// Nominal line box height in pixels.
    fn font_size(&self) -> f64;
}

/// Fixed-advance font approximation.
///
/// Each terminal-style cell (per `unicode-width`, so CJK and emoji count
/// double) advances `font_px * advance_ratio` pixels. Zero-width marks
/// advance nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    font_px: f64,
    advance_ratio: f64,
}

impl MonospaceMetrics {
    /// Font size of the explorer canvas (`16px`).
    pub const DEFAULT_FONT_PX: f64 = 16.0;
    /// Average glyph advance as a fraction of the em size.
    pub const DEFAULT_ADVANCE_RATIO: f64 = 0.6;

    /// Create metrics for a font size and advance ratio.
    ///
    /// Non-finite or negative inputs fall back to the defaults.
    pub fn new(font_px: f64, advance_ratio: f64) -> Self {
        let sane = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        Self {
            font_px: sane(font_px, Self::DEFAULT_FONT_PX),
            advance_ratio: sane(advance_ratio, Self::DEFAULT_ADVANCE_RATIO),
        }
    }

    /// Width of one cell in pixels.
    #[inline]
    pub fn cell_advance(&self) -> f64 {
        self.font_px * self.advance_ratio
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FONT_PX, Self::DEFAULT_ADVANCE_RATIO)
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str) -> f64 {
        text.width() as f64 * self.cell_advance()
    }

    fn font_size(&self) -> f64 {
        self.font_px
    }
}

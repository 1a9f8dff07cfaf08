#![forbid(unsafe_code)]

//! RGBA raster surface.
//!
//! [`Pixmap`] owns a row-major grid of [`PackedRgba`] pixels mirroring an
//! HTML canvas backing store. Rectangles are rasterized by pixel-center
//! coverage and composited source-over. There is no font rasterizer: text
//! is painted as one solid box per visible glyph and the text itself is kept
//! as a [`TextRun`] so callers can still inspect what was written.
//!
//! # Example
//!
//! ```
//! use algoviz_core::geometry::Rect;
//! use algoviz_render::pixmap::Pixmap;
//! use algoviz_render::{PackedRgba, Surface};
//!
//! let mut pixmap = Pixmap::new(40, 20);
//! pixmap.fill_rect(Rect::new(0.0, 0.0, 10.0, 5.0), PackedRgba::WHITE);
//! assert_eq!(pixmap.get(9, 4), Some(PackedRgba::WHITE));
//! assert_eq!(pixmap.get(10, 4), Some(PackedRgba::TRANSPARENT));
//! ```

use algoviz_core::geometry::{Point, Rect, Size};
use unicode_width::UnicodeWidthChar;

use crate::color::PackedRgba;
use crate::metrics::{MonospaceMetrics, TextMetrics};
use crate::surface::Surface;

/// Fraction of the em size a glyph box rises above the baseline.
const GLYPH_ASCENT: f64 = 0.7;
/// Horizontal share of a cell a glyph box covers.
const GLYPH_INK: f64 = 0.7;

/// A line of text drawn onto a pixmap.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub origin: Point,
    pub paint: PackedRgba,
}

/// An in-memory RGBA raster.
#[derive(Debug, Clone)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<PackedRgba>,
    metrics: MonospaceMetrics,
    text_runs: Vec<TextRun>,
}

impl Pixmap {
    /// Create a transparent pixmap with default font metrics.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_metrics(width, height, MonospaceMetrics::default())
    }

    /// Create a transparent pixmap with explicit font metrics.
    pub fn with_metrics(width: u32, height: u32, metrics: MonospaceMetrics) -> Self {
        let len = Size::new(width, height).area() as usize;
        Self {
            width,
            height,
            pixels: vec![PackedRgba::TRANSPARENT; len],
            metrics,
            text_runs: Vec::new(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<PackedRgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    /// Text drawn since the last clear, in draw order.
    pub fn text_runs(&self) -> &[TextRun] {
        &self.text_runs
    }

    /// Count pixels exactly equal to `color`.
    pub fn count(&self, color: PackedRgba) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Flatten to `[r, g, b, a, r, g, b, a, ...]` for image encoders or
    /// a canvas `ImageData`.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Pixel span `[start, end)` whose centers fall inside `[lo, hi)`,
    /// clamped to `0..limit`.
    fn covered_span(lo: f64, hi: f64, limit: u32) -> (u32, u32) {
        let clamp = |v: f64| v.clamp(0.0, f64::from(limit)) as u32;
        let start = clamp((lo - 0.5).ceil());
        let end = clamp((hi - 0.5).ceil());
        (start, end.max(start))
    }
}

impl Surface for Pixmap {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(width = self.width, height = self.height, "pixmap clear");
        self.pixels.fill(PackedRgba::TRANSPARENT);
        self.text_runs.clear();
    }

    fn fill_rect(&mut self, rect: Rect, paint: PackedRgba) {
        if rect.is_empty() || !rect.x.is_finite() || !rect.y.is_finite() {
            return;
        }
        let Some(r) = rect.intersection(&self.size().to_rect()) else {
            return;
        };
        let (x0, x1) = Self::covered_span(r.x, r.right(), self.width);
        let (y0, y1) = Self::covered_span(r.y, r.bottom(), self.height);
        let stride = self.width as usize;

        for y in y0..y1 {
            let row = y as usize * stride;
            for px in &mut self.pixels[row + x0 as usize..row + x1 as usize] {
                *px = paint.over(*px);
            }
        }
    }

    fn fill_text(&mut self, text: &str, origin: Point, paint: PackedRgba) {
        let advance = self.metrics.cell_advance();
        let em = self.metrics.font_size();
        let mut cursor = origin.x;

        for ch in text.chars() {
            let cells = ch.width().unwrap_or(0) as f64;
            if cells == 0.0 {
                continue;
            }
            if !ch.is_whitespace() {
                let glyph = Rect::new(
                    cursor + advance * cells * (1.0 - GLYPH_INK) / 2.0,
                    origin.y - em * GLYPH_ASCENT,
                    advance * cells * GLYPH_INK,
                    em * GLYPH_ASCENT,
                );
                self.fill_rect(glyph, paint);
            }
            cursor += advance * cells;
        }

        self.text_runs.push(TextRun {
            text: text.to_string(),
            origin,
            paint,
        });
    }

    fn measure_text(&self, text: &str) -> f64 {
        self.metrics.measure(text)
    }
}

#![forbid(unsafe_code)]

//! Greedy word wrapping against a pixel width.
//!
//! Words are the pieces of the input split on single spaces (so runs of
//! spaces yield empty words and survive). Each word is appended to the
//! current line together with one trailing space; when the grown line would
//! be wider than the box and the line already holds something, the line is
//! committed and the word starts the next one. The last line is always
//! committed, so every input (the empty string included) produces at least
//! one line, and a word wider than the box sits alone on its own line.
//!
//! Committed lines keep their trailing space, which is invisible when drawn
//! and keeps measured widths identical to what was tested.
//!
//! # Example
//!
//! ```
//! use algoviz_text::wrap::wrap_lines;
//!
//! // One pixel per char.
//! let measure = |s: &str| s.chars().count() as f64;
//! let lines = wrap_lines("Hello world foo bar", 10.0, measure);
//! assert_eq!(lines, vec!["Hello ", "world foo ", "bar "]);
//! ```

use algoviz_core::geometry::Point;
use algoviz_render::{PackedRgba, Surface};
use tracing::debug;

/// Where and how wide wrapped text is laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapBox {
    /// Baseline origin of the first line.
    pub origin: Point,
    /// Maximum line width in pixels.
    pub max_width: f64,
    /// Vertical distance between consecutive baselines.
    pub line_height: f64,
}

impl WrapBox {
    /// Line height used when none is given.
    pub const DEFAULT_LINE_HEIGHT: f64 = 20.0;

    /// Create a box at `origin` with the given maximum width.
    #[must_use]
    pub fn new(origin: Point, max_width: f64) -> Self {
        Self {
            origin,
            max_width,
            line_height: Self::DEFAULT_LINE_HEIGHT,
        }
    }

    /// Set the line height.
    #[must_use]
    pub fn line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }
}

/// A committed line and the baseline position it is drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub origin: Point,
}

/// Wrap `text` into lines no wider than `max_width` where possible.
///
/// `measure` returns the pixel width of a candidate line. Runs in one pass
/// over the words and always returns at least one line.
#[must_use]
pub fn wrap_lines<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ') {
        let mut candidate = String::with_capacity(line.len() + word.len() + 1);
        candidate.push_str(&line);
        candidate.push_str(word);
        candidate.push(' ');

        if measure(&candidate) > max_width && !line.is_empty() {
            let mut next = String::with_capacity(word.len() + 1);
            next.push_str(word);
            next.push(' ');
            lines.push(std::mem::replace(&mut line, next));
        } else {
            line = candidate;
        }
    }

    lines.push(line);
    lines
}

/// Wrap `text` and assign each line its baseline inside `bounds`.
#[must_use]
pub fn layout_lines<F>(text: &str, bounds: &WrapBox, measure: F) -> Vec<PlacedLine>
where
    F: Fn(&str) -> f64,
{
    wrap_lines(text, bounds.max_width, measure)
        .into_iter()
        .enumerate()
        .map(|(i, text)| PlacedLine {
            text,
            origin: bounds.origin.down(i as f64 * bounds.line_height),
        })
        .collect()
}

/// Wrap `text` with the surface's own font metrics and draw it immediately.
///
/// Returns the number of lines drawn (never zero).
pub fn draw_wrapped<S>(surface: &mut S, text: &str, bounds: &WrapBox, paint: PackedRgba) -> usize
where
    S: Surface + ?Sized,
{
    let placed = layout_lines(text, bounds, |s| surface.measure_text(s));
    debug!(
        lines = placed.len(),
        max_width = bounds.max_width,
        "wrapped text"
    );
    for line in &placed {
        surface.fill_text(&line.text, line.origin, paint);
    }
    placed.len()
}

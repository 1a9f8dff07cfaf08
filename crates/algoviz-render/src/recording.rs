#![forbid(unsafe_code)]

//! Draw-op recording surface.
//!
//! [`Recording`] implements [`Surface`] by appending a [`DrawOp`] per call
//! instead of touching pixels. A browser host replays the ops onto a
//! `CanvasRenderingContext2D` (`clearRect`/`fillRect`/`fillText`), and tests
//! assert on exactly which rectangles and strings a frame produced.
//!
//! Calling [`Surface::clear`] starts a new frame: earlier ops are dropped and
//! a single [`DrawOp::Clear`] is recorded, so [`Recording::ops`] always holds
//! one complete frame.
//!
//! # Example
//!
//! ```
//! use algoviz_core::geometry::{Point, Rect};
//! use algoviz_render::recording::{DrawOp, Recording};
//! use algoviz_render::{PackedRgba, Surface};
//!
//! let mut rec = Recording::new(800, 260);
//! rec.clear();
//! rec.fill_rect(Rect::new(16.0, 20.0, 10.0, 30.0), PackedRgba::WHITE);
//! rec.fill_text("hi", Point::new(16.0, 32.0), PackedRgba::WHITE);
//! assert_eq!(rec.rects().count(), 1);
//! assert_eq!(rec.texts().collect::<Vec<_>>(), ["hi"]);
//! assert!(matches!(rec.ops()[0], DrawOp::Clear { .. }));
//! ```

use algoviz_core::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::color::PackedRgba;
use crate::metrics::{MonospaceMetrics, TextMetrics};
use crate::surface::Surface;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Clear the whole surface to transparent.
    Clear { width: u32, height: u32 },
    /// Fill a rectangle (extents may be negative, as on a canvas).
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: PackedRgba,
    },
    /// Fill one line of text, baseline at `y`.
    FillText {
        text: String,
        x: f64,
        y: f64,
        color: PackedRgba,
    },
}

impl DrawOp {
    /// Rectangle of a `FillRect` op.
    pub fn rect(&self) -> Option<Rect> {
        match *self {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                ..
            } => Some(Rect::new(x, y, width, height)),
            _ => None,
        }
    }

    /// Text of a `FillText` op.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Paint used by a fill op.
    pub fn color(&self) -> Option<PackedRgba> {
        match *self {
            DrawOp::FillRect { color, .. } | DrawOp::FillText { color, .. } => Some(color),
            DrawOp::Clear { .. } => None,
        }
    }
}

/// A surface that records draw calls.
#[derive(Debug, Clone)]
pub struct Recording {
    size: Size,
    metrics: MonospaceMetrics,
    ops: Vec<DrawOp>,
}

impl Recording {
    /// Create an empty recording with default font metrics.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_metrics(width, height, MonospaceMetrics::default())
    }

    /// Create an empty recording with explicit font metrics.
    pub fn with_metrics(width: u32, height: u32, metrics: MonospaceMetrics) -> Self {
        Self {
            size: Size::new(width, height),
            metrics,
            ops: Vec::new(),
        }
    }

    /// Font metrics used for `measure_text`.
    pub fn metrics(&self) -> MonospaceMetrics {
        self.metrics
    }

    /// Ops recorded since the last clear.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Move the recorded ops out, leaving the recording empty.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Whether nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Rectangles filled, in draw order.
    pub fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.ops.iter().filter_map(DrawOp::rect)
    }

    /// Rectangles filled with a given color, in draw order.
    pub fn rects_with(&self, color: PackedRgba) -> impl Iterator<Item = Rect> + '_ {
        self.ops
            .iter()
            .filter(move |op| matches!(op, DrawOp::FillRect { color: c, .. } if *c == color))
            .filter_map(DrawOp::rect)
    }

    /// Strings drawn, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(DrawOp::text)
    }

    /// Serialize the current frame for a host.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.ops)
    }

    /// Replay the recorded ops onto another surface.
    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        replay_ops(&self.ops, target);
    }
}

/// Replay a sequence of ops onto a surface.
pub fn replay_ops<S: Surface + ?Sized>(ops: &[DrawOp], target: &mut S) {
    for op in ops {
        match op {
            DrawOp::Clear { .. } => target.clear(),
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => target.fill_rect(Rect::new(*x, *y, *width, *height), *color),
            DrawOp::FillText { text, x, y, color } => {
                target.fill_text(text, Point::new(*x, *y), *color);
            }
        }
    }
}

impl Surface for Recording {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear {
            width: self.size.width,
            height: self.size.height,
        });
    }

    fn fill_rect(&mut self, rect: Rect, paint: PackedRgba) {
        self.ops.push(DrawOp::FillRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: paint,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, paint: PackedRgba) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x: origin.x,
            y: origin.y,
            color: paint,
        });
    }

    fn measure_text(&self, text: &str) -> f64 {
        self.metrics.measure(text)
    }
}

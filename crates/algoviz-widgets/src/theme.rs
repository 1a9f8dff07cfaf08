#![forbid(unsafe_code)]

//! Canvas color palette.

use algoviz_render::PackedRgba;

/// Colors used by the visualization canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Canvas background (slate 900).
    pub background: PackedRgba,
    /// Header and instruction text (amber 400).
    pub accent: PackedRgba,
    /// List bars (sky 500).
    pub bar: PackedRgba,
    /// Metric bar track (slate 600).
    pub track: PackedRgba,
    /// Metric bar fill.
    pub fill: PackedRgba,
    /// Metric labels.
    pub label: PackedRgba,
}

impl Theme {
    pub const SLATE: Self = Self {
        background: PackedRgba::rgb(0x0f, 0x17, 0x2a),
        accent: PackedRgba::rgb(0xfa, 0xcc, 0x15),
        bar: PackedRgba::rgb(0x0e, 0xa5, 0xe9),
        track: PackedRgba::rgb(0x47, 0x55, 0x69),
        fill: PackedRgba::rgb(0xfa, 0xcc, 0x15),
        label: PackedRgba::rgb(0xcb, 0xd5, 0xf5),
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::SLATE
    }
}

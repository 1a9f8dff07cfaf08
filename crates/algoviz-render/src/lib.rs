#![forbid(unsafe_code)]

//! Render kernel: colors, text metrics, and drawing surfaces.
//!
//! Everything that draws goes through the [`surface::Surface`] trait, which
//! mirrors the subset of a browser 2D canvas the explorer needs. Two
//! implementations ship here: [`pixmap::Pixmap`] rasterizes into an RGBA
//! buffer, and [`recording::Recording`] keeps the draw calls as data so a
//! host can replay them or tests can assert on them.

pub mod color;
#[cfg(feature = "png")]
pub mod export;
pub mod metrics;
pub mod pixmap;
pub mod recording;
pub mod surface;

pub use color::PackedRgba;
pub use surface::Surface;

#![forbid(unsafe_code)]

//! Text layout for pixel surfaces.

pub mod wrap;

pub use wrap::{PlacedLine, WrapBox, draw_wrapped, layout_lines, wrap_lines};

#![forbid(unsafe_code)]

//! Core: pixel-space geometry and the algorithm catalog data model.

pub mod catalog;
pub mod geometry;

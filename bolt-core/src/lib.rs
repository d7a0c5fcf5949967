//! Core 2-D dielectric-breakdown / lightning fractal generation library.
//!
//! Main components:
//! - [`preset`] — scalar parameter sets for the growth algorithm.
//! - [`tree`] — branches and the growable slot list they live in.
//! - [`growth`] — branch activation, splitting, and the drive loop.
//! - [`sample`] — normal sampling and the split-proportion fold.
//! - [`raster`] — the drawing-surface abstraction and stroke rules.
//! - [`canvas`] — a persistent CPU pixel buffer implementing [`raster`].
//! - [`types`] — shared type aliases and IDs.

pub mod canvas;
pub mod growth;
pub mod preset;
pub mod raster;
pub mod sample;
pub mod tree;
pub mod types;

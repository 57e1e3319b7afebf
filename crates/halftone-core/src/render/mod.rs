//! Halftone grid rendering.
//!
//! [`HalftoneGrid`] walks the cell grid and decides each dot's radius,
//! [`FillResolver`] decides its color, and a [`DotSink`] receives the
//! result. Two sinks exist: the raster canvas in the application crate and
//! [`VectorRecorder`] here, which keeps circles for export.

mod color_mode;
mod dot;
mod fill;
mod grid;
mod noise_pattern;

pub use color_mode::ColorMode;
pub use dot::{Dot, DotSink, VectorRecorder};
pub use fill::{FillResolver, SECONDARY_FALLBACK};
pub use grid::{HalftoneGrid, MIN_VISIBLE_RADIUS};
pub use noise_pattern::NoisePattern;

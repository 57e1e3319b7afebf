//! Tone and filter stages.
//!
//! Each stage is a free function over a [`GrayBuffer`](crate::GrayBuffer)
//! so it can be tested on its own. [`TonePipeline`] strings them together
//! in the fixed per-frame order.

mod blur;
mod curve;
mod grayscale;
mod invert;
mod pipeline;

pub use blur::box_blur;
pub use curve::{ToneCurve, CONTRAST_MAX, CONTRAST_MIN};
pub use grayscale::to_grayscale;
pub use invert::invert;
pub use pipeline::TonePipeline;

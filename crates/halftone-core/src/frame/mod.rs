//! Pixel buffers flowing through the pipeline.
//!
//! - [`RgbaFrame`]: decoded media input at output resolution
//! - [`GrayBuffer`]: the per-frame luminance buffer the filters work on

mod error;
mod gray;
mod rgba;

pub use error::FrameError;
pub use gray::GrayBuffer;
pub use rgba::RgbaFrame;

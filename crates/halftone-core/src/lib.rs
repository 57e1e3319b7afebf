#![allow(clippy::module_inception, clippy::manual_range_contains)]

//! halftone-core: turn pixel frames into colored halftone dots
//!
//! This crate is the pure part of the halftone studio. It takes RGBA frames
//! that someone else decoded and produces dots that someone else draws.
//! There is no I/O and no global state; every call receives its
//! [`RenderConfig`] and, where randomness is involved, its `Rng`.
//!
//! # Quick Start
//!
//! ```
//! use halftone_core::{ColorMode, FrameInputs, Halftoner, RenderConfig, Rgb, RgbaFrame, VectorRecorder};
//!
//! let config = RenderConfig::new().cell_size(10).color_mode(ColorMode::GradientX);
//! let halftoner = Halftoner::new(config);
//!
//! let frame = RgbaFrame::from_fn(40, 20, |x, _| {
//!     let v = (x * 6) as u8;
//!     Rgb::new(v, v, v)
//! });
//! let gray = halftoner.filter(&frame, &mut rand::thread_rng());
//!
//! let mut dots = VectorRecorder::new();
//! halftoner.render(&FrameInputs::empty(40, 20).gray(&gray), &mut dots);
//! assert!(!dots.dots().is_empty());
//! ```
//!
//! # Pipeline
//!
//! ```text
//! RgbaFrame (primary)
//!     |
//!     v
//! to_grayscale            0.299 r + 0.587 g + 0.114 b
//!     |
//!     v
//! ToneCurve               brightness, contrast, gamma
//!     |
//!     v
//! box_blur                floor(s) 3x3 passes + fractional fade
//!     |
//!     v
//! DitherMode              none / Floyd-Steinberg / ordered / noise
//!     |
//!     v
//! invert (optional)
//!     |
//!     v
//! GrayBuffer ----------> HalftoneGrid  radius = cell/2 * scale * (1 - L/255)
//!                             |
//!           FillResolver <----+        color by ColorMode, then hue rotation
//!                             |
//!                             v
//!                          DotSink     raster canvas or VectorRecorder
//! ```
//!
//! # Sampling
//!
//! A cell's luminance is the filtered sample at the cell's top-left pixel.
//! The cell is not averaged, so fine detail smaller than a cell can alias.
//!
//! # Missing inputs
//!
//! Rendering never fails for lack of a source. Without a primary frame
//! every dot is full size; color modes that need a missing input fall back
//! to a fixed value documented on [`FillResolver`].

pub mod api;
pub mod color;
pub mod config;
pub mod dither;
pub mod error;
pub mod frame;
pub mod gradient;
pub mod render;
pub mod tone;


pub use api::{FrameInputs, Halftoner};
pub use color::{rotate_hue, Hsl, ParseColorError, Rgb};
pub use config::RenderConfig;
pub use dither::{Dither, DitherMode, FloydSteinberg, NoiseThreshold, OrderedBayer};
pub use error::UnknownModeError;
pub use frame::{FrameError, GrayBuffer, RgbaFrame};
pub use gradient::{Gradient, GradientError, GradientStop, Ramp};
pub use render::{
    ColorMode, Dot, DotSink, FillResolver, HalftoneGrid, NoisePattern, VectorRecorder,
};
pub use tone::{box_blur, invert, to_grayscale, TonePipeline, ToneCurve};

//! Color types and utilities
//!
//! - [`Rgb`]: 8-bit sRGB, the currency of gradients and dot fills
//! - [`Hsl`]: used only for the global hue rotation

mod error;
mod hsl;
mod rgb;

pub use error::ParseColorError;
pub use hsl::{rotate_hue, Hsl};
pub use rgb::{Rgb, LUMA_B, LUMA_G, LUMA_R};

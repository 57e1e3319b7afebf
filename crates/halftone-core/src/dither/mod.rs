//! Binarizing dither stages.
//!
//! Every algorithm turns the continuous-tone grayscale buffer into samples
//! that are exactly 0.0 or 255.0. They run after the tone curve and blur
//! and before the optional inversion.
//!
//! # Algorithms
//!
//! - **Floyd-Steinberg**: error diffusion at threshold 128
//! - **Ordered**: 2x2 Bayer matrix, fully deterministic
//! - **Noise**: uniform random threshold jitter of +/-25
//!
//! All algorithms implement the [`Dither`] trait. [`DitherMode`] is the
//! serializable selection used by the render configuration.
//!
//! # Example
//!
//! ```
//! use halftone_core::{Dither, GrayBuffer, OrderedBayer};
//!
//! let mut buffer = GrayBuffer::filled(4, 4, 128.0);
//! OrderedBayer.dither(&mut buffer, &mut rand::thread_rng());
//! assert!(buffer.as_slice().iter().all(|&v| v == 0.0 || v == 255.0));
//! ```

mod floyd_steinberg;
mod noise;
mod ordered;

pub use floyd_steinberg::FloydSteinberg;
pub use noise::NoiseThreshold;
pub use ordered::OrderedBayer;

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::UnknownModeError;
use crate::frame::GrayBuffer;

/// Binarization threshold shared by the error diffusion and noise stages.
pub const THRESHOLD: f32 = 128.0;

/// Trait for binarizing dither algorithms.
pub trait Dither {
    /// Binarize `buffer` in place.
    ///
    /// `rng` is only consulted by randomized algorithms; deterministic ones
    /// ignore it, so passing a seeded generator makes any mode reproducible.
    fn dither<R: Rng + ?Sized>(&self, buffer: &mut GrayBuffer, rng: &mut R);
}

/// Dither algorithm selection.
///
/// The discriminant order is part of the settings code format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherMode {
    /// Leave the buffer continuous.
    #[default]
    None,
    /// [`FloydSteinberg`] error diffusion.
    FloydSteinberg,
    /// [`OrderedBayer`] 2x2 threshold matrix.
    Ordered,
    /// [`NoiseThreshold`] random threshold jitter.
    Noise,
}

impl DitherMode {
    /// All modes in settings-code index order.
    pub const ALL: [DitherMode; 4] = [
        DitherMode::None,
        DitherMode::FloydSteinberg,
        DitherMode::Ordered,
        DitherMode::Noise,
    ];

    /// Stable name used in JSON and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            DitherMode::None => "none",
            DitherMode::FloydSteinberg => "floydSteinberg",
            DitherMode::Ordered => "ordered",
            DitherMode::Noise => "noise",
        }
    }

    /// Index in [`DitherMode::ALL`].
    pub fn index(self) -> u8 {
        match self {
            DitherMode::None => 0,
            DitherMode::FloydSteinberg => 1,
            DitherMode::Ordered => 2,
            DitherMode::Noise => 3,
        }
    }

    /// Mode for a settings-code index, `None` when out of range.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Run the selected algorithm over `buffer`.
    pub fn apply<R: Rng + ?Sized>(self, buffer: &mut GrayBuffer, rng: &mut R) {
        match self {
            DitherMode::None => {}
            DitherMode::FloydSteinberg => FloydSteinberg.dither(buffer, rng),
            DitherMode::Ordered => OrderedBayer.dither(buffer, rng),
            DitherMode::Noise => NoiseThreshold.dither(buffer, rng),
        }
    }
}

impl fmt::Display for DitherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DitherMode {
    type Err = UnknownModeError;

    /// Case-insensitive; also accepts `floyd-steinberg` and `fs`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(DitherMode::None),
            "floydsteinberg" | "floyd-steinberg" | "fs" => Ok(DitherMode::FloydSteinberg),
            "ordered" | "bayer" => Ok(DitherMode::Ordered),
            "noise" => Ok(DitherMode::Noise),
            _ => Err(UnknownModeError {
                kind: "dither mode",
                name: s.to_string(),
            }),
        }
    }
}

#[inline]
fn binarize(v: f32, threshold: f32) -> f32 {
    if v < threshold {
        0.0
    } else {
        255.0
    }
}

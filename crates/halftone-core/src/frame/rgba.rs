//! RGBA input frames.

use super::error::FrameError;
use crate::color::Rgb;

/// A straight-alpha RGBA8 pixel buffer, row-major.
///
/// This is the hand-off point between media decoding and the pipeline:
/// whatever produces frames (a still image, a video decoder, a test) fills
/// one of these at the requested output resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaFrame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaFrame {
    /// Wrap raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::LengthMismatch`] unless
    /// `data.len() == width * height * 4`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FrameError> {
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A frame filled with one opaque color.
    pub fn solid(width: usize, height: usize, color: Rgb) -> Self {
        let data = [color.r, color.g, color.b, 255].repeat(width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Build a frame by evaluating `f(x, y)` for every pixel (opaque).
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                let c = f(x, y);
                data.extend_from_slice(&[c.r, c.g, c.b, 255]);
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Color channels of the pixel at (x, y), or `None` outside the frame.
    #[inline]
    pub fn rgb_at(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some(Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }
}

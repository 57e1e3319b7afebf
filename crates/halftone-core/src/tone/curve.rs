//! Brightness, contrast and gamma curve.

use crate::frame::GrayBuffer;

/// Safe contrast domain. The contrast factor has a pole at 259.
pub const CONTRAST_MIN: f32 = -128.0;
pub const CONTRAST_MAX: f32 = 127.0;

/// Per-pixel tone curve.
///
/// ```text
/// factor = 259 (c + 255) / (255 (259 - c))
/// v      = clamp(factor (v - 128) + 128 + brightness, 0, 255)
/// v      = 255 (v / 255)^(1 / gamma)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCurve {
    pub brightness: f32,
    pub contrast: f32,
    pub gamma: f32,
}

impl ToneCurve {
    pub fn new(brightness: f32, contrast: f32, gamma: f32) -> Self {
        Self {
            brightness,
            contrast,
            gamma,
        }
    }

    /// Contrast multiplier around mid-grey.
    ///
    /// The input is clamped to [`CONTRAST_MIN`]..=[`CONTRAST_MAX`] first, so
    /// the pole at 259 can never be reached.
    pub fn contrast_factor(&self) -> f32 {
        let c = if self.contrast.is_nan() {
            0.0
        } else {
            self.contrast.clamp(CONTRAST_MIN, CONTRAST_MAX)
        };
        (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
    }

    /// Gamma exponent actually applied; non-positive or non-finite gamma
    /// is treated as 1.0.
    fn effective_gamma(&self) -> f32 {
        if self.gamma.is_finite() && self.gamma > 0.0 {
            self.gamma
        } else {
            1.0
        }
    }

    /// Map a single sample through the curve.
    #[inline]
    pub fn map(&self, v: f32) -> f32 {
        self.map_with(v, self.contrast_factor(), 1.0 / self.effective_gamma())
    }

    #[inline]
    fn map_with(&self, v: f32, factor: f32, inv_gamma: f32) -> f32 {
        let v = (factor * (v - 128.0) + 128.0 + self.brightness).clamp(0.0, 255.0);
        255.0 * (v / 255.0).powf(inv_gamma)
    }

    /// Apply the curve to every sample in place.
    pub fn apply(&self, buffer: &mut GrayBuffer) {
        let factor = self.contrast_factor();
        let inv_gamma = 1.0 / self.effective_gamma();
        for v in buffer.as_mut_slice() {
            *v = self.map_with(*v, factor, inv_gamma);
        }
    }
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

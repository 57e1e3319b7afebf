//! Render configuration.
//!
//! A plain value handed to every pipeline call. Nothing in the crate keeps
//! configuration in shared state.

use crate::dither::DitherMode;
use crate::gradient::Gradient;
use crate::render::{ColorMode, HalftoneGrid};
use crate::tone::{TonePipeline, ToneCurve, CONTRAST_MAX, CONTRAST_MIN};

/// Brightness offset range.
pub const BRIGHTNESS_RANGE: (f32, f32) = (-100.0, 155.0);
/// Contrast offset range (the contrast factor's pole at 259 is excluded).
pub const CONTRAST_RANGE: (f32, f32) = (CONTRAST_MIN, CONTRAST_MAX);
/// Gamma exponent range.
pub const GAMMA_RANGE: (f32, f32) = (0.1, 25.5);
/// Blur strength range.
pub const BLUR_RANGE: (f32, f32) = (0.0, 25.5);
/// Cell size range in pixels.
pub const CELL_SIZE_RANGE: (usize, usize) = (5, 260);
/// Dot scale range.
pub const DOT_SCALE_RANGE: (f32, f32) = (0.0, 25.5);
/// Hue rotation range in degrees.
pub const HUE_RANGE: (f32, f32) = (-180.0, 180.0);

/// Every tunable parameter of the pipeline.
///
/// Builder setters clamp into the ranges above instead of rejecting input,
/// so any `RenderConfig` can be carried by a settings code.
///
/// # Defaults
///
/// | field | value |
/// |---|---|
/// | brightness | 0 |
/// | contrast | 0 |
/// | gamma | 1.0 |
/// | blur | 0.0 |
/// | dither | None |
/// | cell size | 10 |
/// | dot scale | 1.0 |
/// | hue | 0 |
/// | invert | false |
/// | color mode | lumFromSource |
/// | gradient | red at 0, blue at 100 |
///
/// # Example
///
/// ```
/// use halftone_core::{ColorMode, DitherMode, RenderConfig};
///
/// let config = RenderConfig::new()
///     .cell_size(12)
///     .dither(DitherMode::Ordered)
///     .color_mode(ColorMode::Checkered)
///     .contrast(300.0); // clamped
///
/// assert_eq!(config.contrast, 127.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub brightness: f32,
    pub contrast: f32,
    pub gamma: f32,
    pub blur: f32,
    pub dither: DitherMode,
    pub cell_size: usize,
    pub dot_scale: f32,
    pub hue: f32,
    pub invert: bool,
    pub color_mode: ColorMode,
    pub gradient: Gradient,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 0.0,
            gamma: 1.0,
            blur: 0.0,
            dither: DitherMode::None,
            cell_size: 10,
            dot_scale: 1.0,
            hue: 0.0,
            invert: false,
            color_mode: ColorMode::LumFromSource,
            gradient: Gradient::default(),
        }
    }
}

impl RenderConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brightness(mut self, brightness: f32) -> Self {
        self.brightness = clamp(brightness, BRIGHTNESS_RANGE, 0.0);
        self
    }

    pub fn contrast(mut self, contrast: f32) -> Self {
        self.contrast = clamp(contrast, CONTRAST_RANGE, 0.0);
        self
    }

    pub fn gamma(mut self, gamma: f32) -> Self {
        self.gamma = clamp(gamma, GAMMA_RANGE, 1.0);
        self
    }

    pub fn blur(mut self, blur: f32) -> Self {
        self.blur = clamp(blur, BLUR_RANGE, 0.0);
        self
    }

    pub fn dither(mut self, dither: DitherMode) -> Self {
        self.dither = dither;
        self
    }

    pub fn cell_size(mut self, cell_size: usize) -> Self {
        self.cell_size = cell_size.clamp(CELL_SIZE_RANGE.0, CELL_SIZE_RANGE.1);
        self
    }

    pub fn dot_scale(mut self, dot_scale: f32) -> Self {
        self.dot_scale = clamp(dot_scale, DOT_SCALE_RANGE, 1.0);
        self
    }

    pub fn hue(mut self, hue: f32) -> Self {
        self.hue = clamp(hue, HUE_RANGE, 0.0);
        self
    }

    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    pub fn gradient(mut self, gradient: Gradient) -> Self {
        self.gradient = gradient;
        self
    }

    /// Filter chain for this configuration.
    pub fn tone_pipeline(&self) -> TonePipeline {
        TonePipeline {
            curve: ToneCurve::new(self.brightness, self.contrast, self.gamma),
            blur: self.blur,
            dither: self.dither,
            invert: self.invert,
        }
    }

    /// Grid geometry for this configuration.
    pub fn grid(&self) -> HalftoneGrid {
        HalftoneGrid::new(self.cell_size, self.dot_scale)
    }
}

#[inline]
fn clamp(value: f32, (min, max): (f32, f32), nan: f32) -> f32 {
    if value.is_nan() {
        nan
    } else {
        value.clamp(min, max)
    }
}

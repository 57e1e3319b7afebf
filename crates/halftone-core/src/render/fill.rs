//! Per-dot fill color resolution.

use super::{ColorMode, NoisePattern};
use crate::color::{rotate_hue, Rgb};
use crate::frame::{GrayBuffer, RgbaFrame};
use crate::gradient::Ramp;

/// Base color for [`ColorMode::SecondaryImageColor`] when there is no
/// secondary pixel to read.
pub const SECONDARY_FALLBACK: Rgb = Rgb::new(0, 0, 255);

/// Resolves the fill color of the dot anchored at a cell origin.
///
/// Built once per frame; every lookup is read-only. Missing inputs never
/// fail a lookup, each mode has a fixed fallback:
///
/// | mode | without its input |
/// |---|---|
/// | `lumFromSource` | `t = 0` |
/// | `lumFromSecondary` | `t = 0` |
/// | `secondaryImageColor` | [`SECONDARY_FALLBACK`] |
/// | `noise` | `t = 0` |
///
/// The global hue rotation is applied last, to every mode.
#[derive(Debug, Clone)]
pub struct FillResolver<'a> {
    pub mode: ColorMode,
    pub ramp: Ramp,
    pub hue: f32,
    pub cell_size: usize,
    pub width: usize,
    pub height: usize,
    pub gray: Option<&'a GrayBuffer>,
    pub secondary: Option<&'a RgbaFrame>,
    pub noise: Option<&'a NoisePattern>,
}

impl FillResolver<'_> {
    /// Final fill color for pixel (x, y).
    pub fn resolve(&self, x: usize, y: usize) -> Rgb {
        rotate_hue(self.base_color(x, y), self.hue)
    }

    /// Mode color before hue rotation.
    pub fn base_color(&self, x: usize, y: usize) -> Rgb {
        match self.mode {
            ColorMode::GradientX => self.ramp.color_at(unit(x, self.width)),
            ColorMode::GradientY => self.ramp.color_at(unit(y, self.height)),
            ColorMode::LumFromSource => {
                let t = self
                    .gray
                    .and_then(|gray| gray.get(x, y))
                    .map_or(0.0, |l| l / 255.0);
                self.ramp.color_at(t)
            }
            ColorMode::LumFromSecondary => {
                let t = self
                    .secondary_pixel(x, y)
                    .map_or(0.0, |c| c.luminance() / 255.0);
                self.ramp.color_at(t)
            }
            ColorMode::SecondaryImageColor => {
                self.secondary_pixel(x, y).unwrap_or(SECONDARY_FALLBACK)
            }
            ColorMode::Noise => {
                let t = self.noise.and_then(|n| n.value_at(x, y)).unwrap_or(0.0);
                self.ramp.color_at(t)
            }
            ColorMode::Checkered => self.checkered(x, y),
        }
    }

    fn checkered(&self, x: usize, y: usize) -> Rgb {
        let cell = self.cell_size.max(1);
        let even = (x / cell + y / cell) % 2 == 0;
        let (first, last) = match (self.ramp.first_color(), self.ramp.last_color()) {
            (Some(first), Some(last)) if self.ramp.stops().len() >= 2 => (first, last),
            _ => (Rgb::BLACK, Rgb::WHITE),
        };
        if even {
            first
        } else {
            last
        }
    }

    fn secondary_pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.secondary.and_then(|frame| frame.rgb_at(x, y))
    }
}

/// `v / (extent - 1)`, with a single-pixel extent mapping to 0.
#[inline]
fn unit(v: usize, extent: usize) -> f32 {
    if extent <= 1 {
        0.0
    } else {
        v as f32 / (extent - 1) as f32
    }
}

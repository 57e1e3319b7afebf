//! Fixed-order filter chain from RGBA frame to filtered luminance.

use rand::Rng;

use super::{box_blur, invert, to_grayscale, ToneCurve};
use crate::dither::DitherMode;
use crate::frame::{GrayBuffer, RgbaFrame};

/// The per-frame filter chain.
///
/// Stages always run in this order:
///
/// 1. grayscale conversion (allocates the frame's only buffer)
/// 2. brightness / contrast / gamma ([`ToneCurve`])
/// 3. box blur ([`box_blur`])
/// 4. dithering ([`DitherMode`])
/// 5. inversion, when enabled
///
/// The buffer is moved from stage to stage; no stage can observe another
/// stage's intermediate state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonePipeline {
    pub curve: ToneCurve,
    pub blur: f32,
    pub dither: DitherMode,
    pub invert: bool,
}

impl TonePipeline {
    /// Run all stages over `frame`.
    pub fn run<R: Rng + ?Sized>(&self, frame: &RgbaFrame, rng: &mut R) -> GrayBuffer {
        let buffer = to_grayscale(frame);
        self.filter(buffer, rng)
    }

    /// Run stages 2-5 over an existing grayscale buffer.
    pub fn filter<R: Rng + ?Sized>(&self, mut buffer: GrayBuffer, rng: &mut R) -> GrayBuffer {
        self.curve.apply(&mut buffer);
        let mut buffer = box_blur(buffer, self.blur);
        self.dither.apply(&mut buffer, rng);
        if self.invert {
            invert(&mut buffer);
        }
        buffer
    }
}

impl Default for TonePipeline {
    fn default() -> Self {
        Self {
            curve: ToneCurve::default(),
            blur: 0.0,
            dither: DitherMode::None,
            invert: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_default_pipeline_is_grayscale_only() {
        let frame = RgbaFrame::from_fn(4, 2, |x, _| Rgb::new(x as u8 * 60, 10, 200));
        let out = TonePipeline::default().run(&frame, &mut rng());
        let gray = to_grayscale(&frame);
        for (a, b) in out.as_slice().iter().zip(gray.as_slice()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_invert_runs_after_dither() {
        let pipeline = TonePipeline {
            dither: DitherMode::Ordered,
            invert: true,
            ..TonePipeline::default()
        };
        let frame = RgbaFrame::solid(2, 2, Rgb::new(128, 128, 128));
        let out = pipeline.run(&frame, &mut rng());
        // Ordered mid grey is [255, 0, 0, 255] before inversion
        assert_eq!(out.as_slice(), &[0.0, 255.0, 255.0, 0.0]);
    }

    #[test]
    fn test_curve_runs_before_dither() {
        // Brightness pushes mid grey above every Bayer threshold
        let pipeline = TonePipeline {
            curve: ToneCurve::new(150.0, 0.0, 1.0),
            dither: DitherMode::Ordered,
            ..TonePipeline::default()
        };
        let frame = RgbaFrame::solid(2, 2, Rgb::new(100, 100, 100));
        let out = pipeline.run(&frame, &mut rng());
        assert!(out.as_slice().iter().all(|&v| v == 255.0));
    }

    #[test]
    fn test_blur_runs_before_dither() {
        let pipeline = TonePipeline {
            blur: 1.0,
            dither: DitherMode::FloydSteinberg,
            ..TonePipeline::default()
        };
        let frame = RgbaFrame::from_fn(5, 5, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb::WHITE
            } else {
                Rgb::BLACK
            }
        });
        let out = pipeline.run(&frame, &mut rng());
        assert!(out.as_slice().iter().all(|&v| v == 0.0 || v == 255.0));
    }
}

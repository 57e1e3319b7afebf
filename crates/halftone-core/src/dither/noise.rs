//! Random-threshold dithering.

use rand::Rng;

use super::{binarize, Dither, THRESHOLD};
use crate::frame::GrayBuffer;

/// Half-width of the uniform perturbation.
const AMPLITUDE: f32 = 25.0;

/// Noise dithering.
///
/// Adds a uniform perturbation in `[-25, 25)` to every sample and then
/// binarizes at 128. Samples more than 25 away from the threshold are
/// therefore unaffected by the noise.
pub struct NoiseThreshold;

impl Dither for NoiseThreshold {
    fn dither<R: Rng + ?Sized>(&self, buffer: &mut GrayBuffer, rng: &mut R) {
        for v in buffer.as_mut_slice() {
            let noise = (rng.gen::<f32>() - 0.5) * 2.0 * AMPLITUDE;
            *v = binarize(*v + noise, THRESHOLD);
        }
    }
}

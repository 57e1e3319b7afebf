//! Ordered dithering with a 2x2 Bayer matrix.

use rand::Rng;

use super::{binarize, Dither};
use crate::frame::GrayBuffer;

const BAYER_2X2: [[f32; 2]; 2] = [[0.0, 2.0], [3.0, 1.0]];

/// Threshold for pixel (x, y): `(bayer[y % 2][x % 2] + 0.5) * 255 / 4`.
#[inline]
pub(crate) fn bayer_threshold(x: usize, y: usize) -> f32 {
    (BAYER_2X2[y % 2][x % 2] + 0.5) * (255.0 / 4.0)
}

/// Ordered (Bayer) dithering.
///
/// Each pixel is compared against a position-dependent threshold. No error
/// is carried between pixels and no randomness is involved, so identical
/// input always produces identical output.
///
/// Thresholds over a 2x2 tile:
///
/// ```text
///  31.875   159.375
/// 223.125    95.625
/// ```
pub struct OrderedBayer;

impl Dither for OrderedBayer {
    fn dither<R: Rng + ?Sized>(&self, buffer: &mut GrayBuffer, _rng: &mut R) {
        let width = buffer.width();
        for (idx, v) in buffer.as_mut_slice().iter_mut().enumerate() {
            let (x, y) = (idx % width, idx / width);
            *v = binarize(*v, bayer_threshold(x, y));
        }
    }
}

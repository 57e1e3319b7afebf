//! Floyd-Steinberg error diffusion on a single gray channel.

use rand::Rng;

use super::{binarize, Dither, THRESHOLD};
use crate::frame::GrayBuffer;

/// (dx, dy, weight) neighbors; weights are sixteenths.
///
/// ```text
///        X   7
///    3   5   1
/// ```
const KERNEL: [(isize, usize, f32); 4] = [
    (1, 0, 7.0),  // right
    (-1, 1, 3.0), // bottom-left
    (0, 1, 5.0),  // bottom
    (1, 1, 1.0),  // bottom-right
];

/// Floyd-Steinberg error diffusion.
///
/// Scans row-major, left to right on every row. Each sample is binarized
/// at 128 and the quantization error is pushed into the neighbors that
/// exist; error that would fall off the buffer is dropped, never wrapped.
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither<R: Rng + ?Sized>(&self, buffer: &mut GrayBuffer, _rng: &mut R) {
        let width = buffer.width();
        let height = buffer.height();
        let values = buffer.as_mut_slice();

        for y in 0..height {
            for x in 0..width {
                let idx = y * width + x;
                let old = values[idx];
                let new = binarize(old, THRESHOLD);
                let error = old - new;
                values[idx] = new;

                for &(dx, dy, weight) in &KERNEL {
                    let nx = x as isize + dx;
                    let ny = y + dy;
                    if nx < 0 || nx as usize >= width || ny >= height {
                        continue;
                    }
                    values[ny * width + nx as usize] += error * weight / 16.0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run(buffer: &mut GrayBuffer) {
        FloydSteinberg.dither(buffer, &mut StdRng::seed_from_u64(0));
    }

    #[test]
    fn test_output_is_binary() {
        let values = (0..64).map(|i| i as f32 * 4.0).collect();
        let mut buffer = GrayBuffer::from_vec(8, 8, values);
        run(&mut buffer);
        assert!(buffer.as_slice().iter().all(|&v| v == 0.0 || v == 255.0));
    }

    #[test]
    fn test_error_pushed_right() {
        // 100 -> 0 with error 100; right neighbor gets 7/16 of it
        let mut buffer = GrayBuffer::from_vec(2, 1, vec![100.0, 90.0]);
        run(&mut buffer);
        // 90 + 43.75 = 133.75 >= 128
        assert_eq!(buffer.as_slice(), &[0.0, 255.0]);
    }

    #[test]
    fn test_error_pushed_down_without_wrap() {
        // Right edge pixel: only the bottom and bottom-left neighbors exist
        let mut buffer = GrayBuffer::from_vec(2, 2, vec![0.0, 100.0, 60.0, 0.0]);
        run(&mut buffer);
        // (1,0): error 100 -> (0,1) += 18.75, (1,1) += 31.25
        // (0,1): 78.75 -> 0, error 78.75 -> (1,1) += 34.45
        // (1,1): 31.25 + 34.45 = 65.7 -> 0
        assert_eq!(buffer.as_slice(), &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_mid_grey_mixes() {
        let mut buffer = GrayBuffer::filled(16, 16, 127.5);
        run(&mut buffer);
        let white = buffer.as_slice().iter().filter(|&&v| v == 255.0).count();
        // Roughly half the pixels end up white
        assert!((96..=160).contains(&white), "white = {white}");
    }

    #[test]
    fn test_empty_buffer() {
        let mut buffer = GrayBuffer::filled(0, 0, 0.0);
        run(&mut buffer);
        assert!(buffer.is_empty());
    }
}

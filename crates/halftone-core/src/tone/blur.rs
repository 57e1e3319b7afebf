//! Fractional-strength box blur.

use crate::frame::GrayBuffer;

/// Blur `buffer` with a 3x3 box filter at a real-valued strength.
///
/// `floor(strength)` full passes are run back to back, each reading the
/// previous pass's output. At the borders the neighborhood shrinks to the
/// pixels that exist, so edges are averaged over 4 or 6 samples instead of
/// 9 and nothing wraps around. The fractional part then cross-fades between
/// the unblurred input and the fully blurred result:
///
/// ```text
/// result = original * (1 - frac) + blurred * frac
/// ```
///
/// Strength 0 (or any non-positive or NaN strength) returns the buffer
/// unchanged.
pub fn box_blur(buffer: GrayBuffer, strength: f32) -> GrayBuffer {
    if strength.is_nan() || strength <= 0.0 {
        return buffer;
    }

    let passes = strength.floor() as usize;
    let frac = strength - strength.floor();
    let width = buffer.width();
    let height = buffer.height();

    // Ping-pong between two buffers; the original is only kept for the fade
    let original = if frac > 0.0 { Some(buffer.clone()) } else { None };
    let mut current = buffer;
    let mut scratch = GrayBuffer::filled(width, height, 0.0);
    for _ in 0..passes {
        box_pass(&current, &mut scratch);
        std::mem::swap(&mut current, &mut scratch);
    }

    if let Some(original) = original {
        for (out, &orig) in current
            .as_mut_slice()
            .iter_mut()
            .zip(original.as_slice())
        {
            *out = orig * (1.0 - frac) + *out * frac;
        }
    }

    current
}

/// One 3x3 averaging pass from `src` into `dst`.
fn box_pass(src: &GrayBuffer, dst: &mut GrayBuffer) {
    let width = src.width();
    let height = src.height();
    let input = src.as_slice();
    let output = dst.as_mut_slice();

    for y in 0..height {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(height - 1);
        for x in 0..width {
            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(width - 1);

            let mut sum = 0.0;
            for ny in y0..=y1 {
                let row = ny * width;
                for nx in x0..=x1 {
                    sum += input[row + nx];
                }
            }
            let count = ((y1 - y0 + 1) * (x1 - x0 + 1)) as f32;
            output[y * width + x] = sum / count;
        }
    }
}

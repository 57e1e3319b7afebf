//! RGBA to luminance conversion.

use crate::color::{LUMA_B, LUMA_G, LUMA_R};
use crate::frame::{GrayBuffer, RgbaFrame};

/// Convert a frame to a fresh grayscale buffer.
///
/// Uses `0.299 r + 0.587 g + 0.114 b`. Alpha is ignored: a transparent
/// pixel contributes whatever color channels it carries.
pub fn to_grayscale(frame: &RgbaFrame) -> GrayBuffer {
    let values = frame
        .data()
        .chunks_exact(4)
        .map(|px| LUMA_R * px[0] as f32 + LUMA_G * px[1] as f32 + LUMA_B * px[2] as f32)
        .collect();
    GrayBuffer::from_vec(frame.width(), frame.height(), values)
}

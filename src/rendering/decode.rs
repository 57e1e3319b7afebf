//! Image decoding and resampling into pipeline frames.

use halftone_core::RgbaFrame;
use resvg::usvg::{self, Transform};
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint};

use crate::error::{MediaError, RenderError};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// True when `data` starts with the PNG signature.
pub fn is_png(data: &[u8]) -> bool {
    data.starts_with(PNG_SIGNATURE)
}

/// Decode PNG or SVG bytes into a pixmap.
///
/// SVG documents are rasterized at their intrinsic size (rounded up).
pub fn decode_image(data: &[u8]) -> Result<Pixmap, RenderError> {
    if is_png(data) {
        Pixmap::decode_png(data).map_err(|e| RenderError::ImageDecode(e.to_string()))
    } else {
        rasterize_svg(data)
    }
}

fn rasterize_svg(svg_data: &[u8]) -> Result<Pixmap, RenderError> {
    let tree = usvg::Tree::from_data(svg_data, &usvg::Options::default())
        .map_err(|e| RenderError::SvgParse(e.to_string()))?;

    let size = tree.size();
    let width = size.width().ceil() as u32;
    let height = size.height().ceil() as u32;
    let mut pixmap = Pixmap::new(width, height)
        .ok_or(RenderError::UnsupportedDimensions { width, height })?;

    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Stretch a pixmap to exactly `width` x `height` with bilinear filtering.
///
/// The aspect ratio is not preserved.
pub fn stretch(source: &Pixmap, width: usize, height: usize) -> Result<Pixmap, MediaError> {
    let mut target = Pixmap::new(width as u32, height as u32)
        .ok_or(MediaError::FrameAllocation { width, height })?;

    let sx = width as f32 / source.width() as f32;
    let sy = height as f32 / source.height() as f32;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    target.draw_pixmap(0, 0, source.as_ref(), &paint, Transform::from_scale(sx, sy), None);
    Ok(target)
}

/// Copy a pixmap into a straight-alpha frame.
pub fn to_frame(pixmap: &Pixmap) -> Result<RgbaFrame, MediaError> {
    let mut data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaFrame::new(pixmap.width() as usize, pixmap.height() as usize, data)
        .map_err(|e| MediaError::Decode(e.to_string()))
}

/// Resample a pixmap to the requested output resolution.
pub fn frame_at(source: &Pixmap, width: usize, height: usize) -> Result<RgbaFrame, MediaError> {
    if source.width() as usize == width && source.height() as usize == height {
        return to_frame(source);
    }
    to_frame(&stretch(source, width, height)?)
}

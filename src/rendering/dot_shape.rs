use halftone_core::Rgb;
use std::collections::HashMap;
use tiny_skia::{BlendMode, Pixmap, PixmapPaint, Transform};

use super::decode::decode_image;
use crate::error::RenderError;

/// Tinted copies kept before the cache is flushed.
const TINT_CACHE_LIMIT: usize = 256;

/// A custom dot mask.
///
/// Only the mask's alpha channel is used: every dot is the mask filled
/// with the dot color, scaled so its longest side spans the dot diameter.
pub struct DotShape {
    mask: Pixmap,
    tinted: HashMap<Rgb, Pixmap>,
}

impl DotShape {
    /// Load a mask from PNG or SVG bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, RenderError> {
        Ok(Self::from_pixmap(decode_image(data)?))
    }

    pub fn from_pixmap(mask: Pixmap) -> Self {
        Self {
            mask,
            tinted: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    pub fn height(&self) -> u32 {
        self.mask.height()
    }

    pub fn longest_side(&self) -> u32 {
        self.mask.width().max(self.mask.height())
    }

    /// The mask filled with `color`.
    pub fn tinted(&mut self, color: Rgb) -> Option<&Pixmap> {
        if !self.tinted.contains_key(&color) {
            if self.tinted.len() >= TINT_CACHE_LIMIT {
                tracing::trace!(entries = self.tinted.len(), "Flushing dot shape tint cache");
                self.tinted.clear();
            }
            let tinted = tint(&self.mask, color)?;
            self.tinted.insert(color, tinted);
        }
        self.tinted.get(&color)
    }
}

fn tint(mask: &Pixmap, color: Rgb) -> Option<Pixmap> {
    let mut out = Pixmap::new(mask.width(), mask.height())?;
    out.fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255));
    let paint = PixmapPaint {
        blend_mode: BlendMode::DestinationIn,
        ..Default::default()
    };
    out.draw_pixmap(0, 0, mask.as_ref(), &paint, Transform::identity(), None);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_SVG: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
        <path d="M0 10 L10 0 L20 10 Z" fill="black"/>
    </svg>"#;

    #[test]
    fn test_tint_keeps_mask_alpha() {
        let mut shape = DotShape::from_bytes(TRIANGLE_SVG).unwrap();
        assert_eq!(shape.longest_side(), 20);

        let red = shape.tinted(Rgb::new(255, 0, 0)).unwrap();
        // Top corner is outside the triangle
        assert_eq!(red.pixel(0, 0).unwrap().alpha(), 0);
        let inside = red.pixel(10, 8).unwrap().demultiply();
        assert_eq!((inside.red(), inside.green(), inside.blue()), (255, 0, 0));
        assert_eq!(inside.alpha(), 255);
    }

    #[test]
    fn test_tints_are_cached_per_color() {
        let mut shape = DotShape::from_bytes(TRIANGLE_SVG).unwrap();
        shape.tinted(Rgb::BLACK);
        shape.tinted(Rgb::BLACK);
        shape.tinted(Rgb::WHITE);
        assert_eq!(shape.tinted.len(), 2);
    }

    #[test]
    fn test_cache_is_bounded() {
        let mut shape = DotShape::from_bytes(TRIANGLE_SVG).unwrap();
        for i in 0..=TINT_CACHE_LIMIT {
            shape.tinted(Rgb::new((i % 256) as u8, (i / 256) as u8, 0));
        }
        assert!(shape.tinted.len() <= TINT_CACHE_LIMIT);
    }
}

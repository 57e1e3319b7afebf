use halftone_core::{Dot, DotSink};
use tiny_skia::{FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

use super::dot_shape::DotShape;
use super::encode::encode_png;
use crate::error::RenderError;

/// Raster dot sink backed by a tiny-skia pixmap.
///
/// Each frame starts from a transparent surface. Dots are anti-aliased
/// circles, or tinted copies of a [`DotShape`] when one is set.
#[derive(Default)]
pub struct RasterCanvas {
    pixmap: Option<Pixmap>,
    shape: Option<DotShape>,
}

impl RasterCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(shape: DotShape) -> Self {
        Self {
            pixmap: None,
            shape: Some(shape),
        }
    }

    pub fn set_shape(&mut self, shape: Option<DotShape>) {
        self.shape = shape;
    }

    /// Surface of the last frame, if one was started.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Encode the last frame as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        let pixmap = self.pixmap.as_ref().ok_or(RenderError::NoMedia)?;
        encode_png(pixmap)
    }

    fn draw_circle(pixmap: &mut Pixmap, dot: Dot) {
        let Some(path) = PathBuilder::from_circle(dot.cx, dot.cy, dot.radius) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(dot.color.r, dot.color.g, dot.color.b, 255);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn draw_shape(pixmap: &mut Pixmap, shape: &mut DotShape, dot: Dot) {
        let longest = shape.longest_side();
        if longest == 0 {
            return;
        }
        let scale = 2.0 * dot.radius / longest as f32;
        let w = shape.width() as f32 * scale;
        let h = shape.height() as f32 * scale;
        let Some(tinted) = shape.tinted(dot.color) else {
            return;
        };
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..Default::default()
        };
        let transform = Transform::from_row(
            scale,
            0.0,
            0.0,
            scale,
            dot.cx - w / 2.0,
            dot.cy - h / 2.0,
        );
        pixmap.draw_pixmap(0, 0, tinted.as_ref(), &paint, transform, None);
    }
}

impl DotSink for RasterCanvas {
    fn begin_frame(&mut self, width: usize, height: usize) {
        let reuse = matches!(
            &self.pixmap,
            Some(p) if p.width() as usize == width && p.height() as usize == height
        );
        if reuse {
            if let Some(p) = self.pixmap.as_mut() {
                p.fill(tiny_skia::Color::TRANSPARENT);
            }
            return;
        }
        self.pixmap = Pixmap::new(width as u32, height as u32);
        if self.pixmap.is_none() {
            tracing::debug!(width, height, "Cannot allocate raster surface");
        }
    }

    fn draw_dot(&mut self, dot: Dot) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        match self.shape.as_mut() {
            Some(shape) => Self::draw_shape(pixmap, shape, dot),
            None => Self::draw_circle(pixmap, dot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halftone_core::Rgb;

    fn alpha_at(canvas: &RasterCanvas, x: u32, y: u32) -> u8 {
        canvas.pixmap().unwrap().pixel(x, y).unwrap().alpha()
    }

    #[test]
    fn test_circle_is_drawn_centered() {
        let mut canvas = RasterCanvas::new();
        canvas.begin_frame(20, 20);
        canvas.draw_dot(Dot {
            cx: 10.0,
            cy: 10.0,
            radius: 5.0,
            color: Rgb::new(0, 0, 255),
        });

        let center = canvas.pixmap().unwrap().pixel(10, 10).unwrap().demultiply();
        assert_eq!((center.blue(), center.alpha()), (255, 255));
        assert_eq!(alpha_at(&canvas, 1, 1), 0);
    }

    #[test]
    fn test_begin_frame_clears_surface() {
        let mut canvas = RasterCanvas::new();
        canvas.begin_frame(10, 10);
        canvas.draw_dot(Dot {
            cx: 5.0,
            cy: 5.0,
            radius: 4.0,
            color: Rgb::BLACK,
        });
        assert_eq!(alpha_at(&canvas, 5, 5), 255);

        canvas.begin_frame(10, 10);
        assert_eq!(alpha_at(&canvas, 5, 5), 0);

        canvas.begin_frame(7, 3);
        assert_eq!(canvas.pixmap().unwrap().width(), 7);
    }

    #[test]
    fn test_zero_size_frame_draws_nothing() {
        let mut canvas = RasterCanvas::new();
        canvas.begin_frame(0, 0);
        canvas.draw_dot(Dot {
            cx: 0.0,
            cy: 0.0,
            radius: 1.0,
            color: Rgb::BLACK,
        });
        assert!(canvas.pixmap().is_none());
        assert!(matches!(canvas.to_png(), Err(RenderError::NoMedia)));
    }

    #[test]
    fn test_shape_scaled_to_diameter() {
        // Full square mask: the dot covers its 2r box and nothing else
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
            <rect width="4" height="4" fill="black"/>
        </svg>"#;
        let mut canvas = RasterCanvas::with_shape(DotShape::from_bytes(svg).unwrap());
        canvas.begin_frame(30, 30);
        canvas.draw_dot(Dot {
            cx: 15.0,
            cy: 15.0,
            radius: 5.0,
            color: Rgb::new(255, 0, 0),
        });

        assert_eq!(alpha_at(&canvas, 11, 11), 255);
        assert_eq!(alpha_at(&canvas, 18, 18), 255);
        assert_eq!(alpha_at(&canvas, 8, 15), 0);
        assert_eq!(alpha_at(&canvas, 22, 15), 0);
    }
}

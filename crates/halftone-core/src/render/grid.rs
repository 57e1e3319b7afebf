//! Cell grid walk producing one dot per visible cell.

use super::{Dot, DotSink, FillResolver};
use crate::frame::GrayBuffer;

/// Dots at or below this radius are not drawn.
pub const MIN_VISIBLE_RADIUS: f32 = 0.5;

/// Halftone grid geometry.
///
/// Cells of `cell_size` pixels tile the output from (0, 0), left to right
/// and top to bottom; the last row and column may be partial. Each cell's
/// luminance is read from its top-left pixel, not averaged, and its dot is
/// centered at `(x + cell/2, y + cell/2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalftoneGrid {
    pub cell_size: usize,
    pub dot_scale: f32,
}

impl HalftoneGrid {
    pub fn new(cell_size: usize, dot_scale: f32) -> Self {
        Self {
            cell_size: cell_size.max(1),
            dot_scale,
        }
    }

    /// Radius for a cell with luminance `luminance`.
    ///
    /// `None` (no primary source) yields the full-size dot
    /// `cell/2 * dot_scale`.
    pub fn radius_for(&self, luminance: Option<f32>) -> f32 {
        let full = self.cell_size as f32 / 2.0 * self.dot_scale;
        match luminance {
            Some(l) => full * (1.0 - l / 255.0),
            None => full,
        }
    }

    /// Walk every cell of a `width` x `height` output and hand the visible
    /// dots to `sink`. Returns the number of dots emitted.
    pub fn render<S: DotSink + ?Sized>(
        &self,
        width: usize,
        height: usize,
        gray: Option<&GrayBuffer>,
        fill: &FillResolver<'_>,
        sink: &mut S,
    ) -> usize {
        let cell = self.cell_size.max(1);
        let half = cell as f32 / 2.0;
        let mut emitted = 0;

        sink.begin_frame(width, height);
        for y in (0..height).step_by(cell) {
            for x in (0..width).step_by(cell) {
                let luminance = gray.and_then(|g| g.get(x, y));
                let radius = self.radius_for(luminance);
                if radius <= MIN_VISIBLE_RADIUS {
                    continue;
                }
                sink.draw_dot(Dot {
                    cx: x as f32 + half,
                    cy: y as f32 + half,
                    radius,
                    color: fill.resolve(x, y),
                });
                emitted += 1;
            }
        }
        emitted
    }
}

impl Default for HalftoneGrid {
    fn default() -> Self {
        Self::new(10, 1.0)
    }
}

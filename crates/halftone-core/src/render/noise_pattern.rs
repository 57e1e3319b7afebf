//! Per-cell random gradient positions for the noise color mode.

use rand::Rng;

/// A grid of gradient positions, one per cell, drawn once at generation.
///
/// Lookups for the same cell always return the same value until a new
/// pattern is generated. The owner decides when that happens (source
/// load, resize, cell size change, entering the noise mode).
#[derive(Debug, Clone, PartialEq)]
pub struct NoisePattern {
    cell_size: usize,
    cols: usize,
    rows: usize,
    values: Vec<f32>,
}

impl NoisePattern {
    /// Draw a fresh pattern covering a `width` x `height` output tiled by
    /// `cell_size` cells.
    pub fn generate<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        cell_size: usize,
        rng: &mut R,
    ) -> Self {
        let cell_size = cell_size.max(1);
        let cols = width.div_ceil(cell_size);
        let rows = height.div_ceil(cell_size);
        let values = (0..cols * rows).map(|_| rng.gen::<f32>()).collect();
        Self {
            cell_size,
            cols,
            rows,
            values,
        }
    }

    /// Whether this pattern was generated for the given geometry.
    pub fn matches(&self, width: usize, height: usize, cell_size: usize) -> bool {
        let cell_size = cell_size.max(1);
        self.cell_size == cell_size
            && self.cols == width.div_ceil(cell_size)
            && self.rows == height.div_ceil(cell_size)
    }

    /// Gradient position for the cell containing pixel (x, y).
    pub fn value_at(&self, x: usize, y: usize) -> Option<f32> {
        let (col, row) = (x / self.cell_size, y / self.cell_size);
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.values[row * self.cols + col])
    }
}

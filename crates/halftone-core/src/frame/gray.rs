//! Floating-point grayscale buffer.

/// One `f32` luminance sample per pixel, row-major.
///
/// Values are nominally 0.0..=255.0 but may leave that range while error
/// diffusion is running. A fresh buffer is created for every frame and
/// moved through the filter stages by value, so no two stages ever alias
/// the same samples.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayBuffer {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl GrayBuffer {
    /// Buffer of `width * height` samples, all set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; width * height],
        }
    }

    /// Wrap existing samples.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, values: Vec<f32>) -> Self {
        assert_eq!(
            values.len(),
            width * height,
            "gray buffer length does not match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            values,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample at (x, y), or `None` outside the buffer.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.values[y * self.width + x])
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.values
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.values
    }
}

//! Dot primitives and the output sink capability.

use crate::color::Rgb;

/// One halftone dot: a filled circle (or shape instance) centered on its
/// cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub color: Rgb,
}

/// Receiver for the dots of one frame.
///
/// The grid renderer never knows where its output goes. A raster surface
/// draws each dot as it arrives; [`VectorRecorder`] keeps them for export.
pub trait DotSink {
    /// Called once before the first dot of a frame with the output size.
    fn begin_frame(&mut self, _width: usize, _height: usize) {}

    /// Receive one dot.
    fn draw_dot(&mut self, dot: Dot);
}

impl<S: DotSink + ?Sized> DotSink for &mut S {
    fn begin_frame(&mut self, width: usize, height: usize) {
        (**self).begin_frame(width, height);
    }

    fn draw_dot(&mut self, dot: Dot) {
        (**self).draw_dot(dot);
    }
}

/// Sink that records circles for vector export.
///
/// Each [`begin_frame`](DotSink::begin_frame) discards the dots of the
/// previous frame, so one recorder can be reused across an export run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorRecorder {
    width: usize,
    height: usize,
    dots: Vec<Dot>,
}

impl VectorRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas width of the recorded frame.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height of the recorded frame.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn into_dots(self) -> Vec<Dot> {
        self.dots
    }
}

impl DotSink for VectorRecorder {
    fn begin_frame(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.dots.clear();
    }

    fn draw_dot(&mut self, dot: Dot) {
        self.dots.push(dot);
    }
}

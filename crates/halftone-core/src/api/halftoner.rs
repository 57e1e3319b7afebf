//! Halftoner -- the entry point tying filters, grid and fill together.

use rand::Rng;

use crate::config::RenderConfig;
use crate::frame::{GrayBuffer, RgbaFrame};
use crate::render::{DotSink, FillResolver, NoisePattern};

/// Everything the grid renderer reads for one frame.
///
/// Any input may be missing; see [`FillResolver`] for the per-mode
/// fallbacks and [`HalftoneGrid`](crate::HalftoneGrid) for full-size dots
/// without a grayscale buffer.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub width: usize,
    pub height: usize,
    /// Filtered luminance of the primary source
    pub gray: Option<&'a GrayBuffer>,
    /// Secondary source frame at output resolution
    pub secondary: Option<&'a RgbaFrame>,
    pub noise: Option<&'a NoisePattern>,
}

impl<'a> FrameInputs<'a> {
    /// Inputs with nothing loaded.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            gray: None,
            secondary: None,
            noise: None,
        }
    }

    pub fn gray(mut self, gray: &'a GrayBuffer) -> Self {
        self.gray = Some(gray);
        self
    }

    pub fn secondary(mut self, secondary: &'a RgbaFrame) -> Self {
        self.secondary = Some(secondary);
        self
    }

    pub fn noise(mut self, noise: &'a NoisePattern) -> Self {
        self.noise = Some(noise);
        self
    }
}

/// Halftone renderer for one [`RenderConfig`].
///
/// The configuration is owned by value and only read, so one `Halftoner`
/// renders any number of frames. Randomness is injected per call.
///
/// # Example
///
/// ```
/// use halftone_core::{FrameInputs, Halftoner, RenderConfig, Rgb, RgbaFrame, VectorRecorder};
///
/// let halftoner = Halftoner::new(RenderConfig::default());
/// let frame = RgbaFrame::solid(20, 10, Rgb::BLACK);
///
/// let gray = halftoner.filter(&frame, &mut rand::thread_rng());
/// let mut recorder = VectorRecorder::new();
/// let drawn = halftoner.render(&FrameInputs::empty(20, 10).gray(&gray), &mut recorder);
///
/// assert_eq!(drawn, 2);
/// assert_eq!(recorder.dots()[0].radius, 5.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Halftoner {
    config: RenderConfig,
}

impl Halftoner {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Run the tone/filter pipeline over a primary frame.
    pub fn filter<R: Rng + ?Sized>(&self, frame: &RgbaFrame, rng: &mut R) -> GrayBuffer {
        self.config.tone_pipeline().run(frame, rng)
    }

    /// Draw one frame of dots into `sink`. Returns the number of dots.
    pub fn render<S: DotSink + ?Sized>(&self, inputs: &FrameInputs<'_>, sink: &mut S) -> usize {
        let fill = FillResolver {
            mode: self.config.color_mode,
            ramp: self.config.gradient.ramp(),
            hue: self.config.hue,
            cell_size: self.config.cell_size,
            width: inputs.width,
            height: inputs.height,
            gray: inputs.gray,
            secondary: inputs.secondary,
            noise: inputs.noise,
        };
        self.config
            .grid()
            .render(inputs.width, inputs.height, inputs.gray, &fill, sink)
    }

    /// Fresh noise pattern for this configuration's cell size.
    pub fn noise_pattern<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> NoisePattern {
        NoisePattern::generate(width, height, self.config.cell_size, rng)
    }
}

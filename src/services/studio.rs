use halftone_core::{ColorMode, DotSink, FrameInputs, Halftoner, NoisePattern, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

use super::frame_clock::FrameClock;
use crate::error::MediaError;
use crate::media::{aspect_ratio, MediaSource};
use crate::models::AppConfig;

/// Which input slot a source occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Primary,
    Secondary,
}

/// One editing session: configuration, both sources and the frame loop.
///
/// Every frame is produced by [`Studio::recompute_frame`], which reads the
/// current configuration and the current frame of each source. Nothing
/// is rendered ahead of time.
pub struct Studio {
    halftoner: Halftoner,
    primary: Option<Box<dyn MediaSource>>,
    secondary: Option<Box<dyn MediaSource>>,
    noise: Option<NoisePattern>,
    rng: StdRng,
    clock: FrameClock,
    output_width: u32,
    resync_tolerance: f64,
}

impl Studio {
    pub fn new(app: &AppConfig, config: RenderConfig) -> Self {
        Self::with_rng(app, config, StdRng::from_entropy())
    }

    /// Session with a fixed seed for noise dithering and noise colors.
    pub fn seeded(app: &AppConfig, config: RenderConfig, seed: u64) -> Self {
        Self::with_rng(app, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(app: &AppConfig, config: RenderConfig, rng: StdRng) -> Self {
        Self {
            halftoner: Halftoner::new(config),
            primary: None,
            secondary: None,
            noise: None,
            rng,
            clock: FrameClock::new(app.tick_interval(), app.max_frame_delta()),
            output_width: app.output_width.max(1),
            resync_tolerance: app.resync_tolerance,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        self.halftoner.config()
    }

    /// Replace the configuration. Entering the noise color mode draws a
    /// fresh noise pattern on the next frame.
    pub fn set_config(&mut self, config: RenderConfig) {
        let entering_noise = config.color_mode == ColorMode::Noise
            && self.config().color_mode != ColorMode::Noise;
        if entering_noise || config.cell_size != self.config().cell_size {
            self.noise = None;
        }
        self.halftoner = Halftoner::new(config);
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn source(&self, slot: Slot) -> Option<&dyn MediaSource> {
        match slot {
            Slot::Primary => self.primary.as_deref(),
            Slot::Secondary => self.secondary.as_deref(),
        }
    }

    pub(crate) fn sources_mut(
        &mut self,
    ) -> (
        Option<&mut (dyn MediaSource + 'static)>,
        Option<&mut (dyn MediaSource + 'static)>,
    ) {
        (self.primary.as_deref_mut(), self.secondary.as_deref_mut())
    }

    /// Put a source into a slot, replacing what was there.
    pub fn load(&mut self, slot: Slot, mut source: Box<dyn MediaSource>) {
        let (width, height) = source.dimensions();
        tracing::info!(?slot, width, height, video = source.is_video(), "Source loaded");
        if source.is_video() {
            source.play();
        }
        match slot {
            Slot::Primary => self.primary = Some(source),
            Slot::Secondary => self.secondary = Some(source),
        }
        self.noise = None;
    }

    pub fn remove(&mut self, slot: Slot) -> Option<Box<dyn MediaSource>> {
        let removed = match slot {
            Slot::Primary => self.primary.take(),
            Slot::Secondary => self.secondary.take(),
        };
        if removed.is_some() {
            tracing::info!(?slot, "Source removed");
            self.noise = None;
        }
        removed
    }

    /// Exchange primary and secondary.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.primary, &mut self.secondary);
        self.noise = None;
        tracing::debug!("Sources swapped");
    }

    /// Output raster size.
    ///
    /// The width is fixed; the height follows the primary's aspect ratio,
    /// or the secondary's when no primary is loaded.
    pub fn output_size(&self) -> Option<(usize, usize)> {
        let reference = self.primary.as_deref().or(self.secondary.as_deref())?;
        let ratio = aspect_ratio(reference)?;
        let width = self.output_width as usize;
        let height = ((width as f64 * ratio) as usize).max(1);
        Some((width, height))
    }

    /// Render the current frame into `sink`.
    ///
    /// Returns the number of dots drawn. Without any source nothing is
    /// drawn and the sink is not touched.
    pub fn recompute_frame<S: DotSink + ?Sized>(&mut self, sink: &mut S) -> Result<usize, MediaError> {
        let Some((width, height)) = self.output_size() else {
            return Ok(0);
        };

        let gray = match self.primary.as_deref() {
            Some(primary) => {
                let frame = primary.frame(width, height)?;
                Some(self.halftoner.filter(&frame, &mut self.rng))
            }
            None => None,
        };
        let secondary = match self.secondary.as_deref() {
            Some(secondary) => Some(secondary.frame(width, height)?),
            None => None,
        };

        let config = self.halftoner.config();
        if config.color_mode == ColorMode::Noise {
            let stale = self
                .noise
                .as_ref()
                .map_or(true, |noise| !noise.matches(width, height, config.cell_size));
            if stale {
                tracing::debug!(width, height, cell_size = config.cell_size, "Generating noise pattern");
                self.noise = Some(self.halftoner.noise_pattern(width, height, &mut self.rng));
            }
        }

        let mut inputs = FrameInputs::empty(width, height);
        if let Some(gray) = gray.as_ref() {
            inputs = inputs.gray(gray);
        }
        if let Some(secondary) = secondary.as_ref() {
            inputs = inputs.secondary(secondary);
        }
        if let Some(noise) = self.noise.as_ref() {
            inputs = inputs.noise(noise);
        }
        Ok(self.halftoner.render(&inputs, sink))
    }

    /// One step of the live loop: advance video clocks, keep them in step,
    /// redraw. Returns `None` while the clock is suspended.
    pub fn tick<S: DotSink + ?Sized>(
        &mut self,
        now: Instant,
        sink: &mut S,
    ) -> Result<Option<usize>, MediaError> {
        let Some(delta) = self.clock.tick(now) else {
            return Ok(None);
        };
        let dt = delta.as_secs_f64();
        for source in [self.primary.as_deref_mut(), self.secondary.as_deref_mut()]
            .into_iter()
            .flatten()
        {
            source.advance(dt);
        }
        self.resync();
        self.recompute_frame(sink).map(Some)
    }

    /// Seek the secondary video to the primary's time when they drift
    /// apart by more than the tolerance. Returns whether a seek happened.
    pub fn resync(&mut self) -> bool {
        let (Some(primary), Some(secondary)) =
            (self.primary.as_deref(), self.secondary.as_deref_mut())
        else {
            return false;
        };
        if !primary.is_video() || !secondary.is_video() {
            return false;
        }
        let drift = (primary.current_time() - secondary.current_time()).abs();
        if drift <= self.resync_tolerance {
            return false;
        }
        tracing::debug!(drift, target = primary.current_time(), "Resyncing secondary");
        secondary.set_current_time(primary.current_time());
        true
    }

    /// Play or pause every video source.
    pub fn set_playing(&mut self, playing: bool) {
        for source in [self.primary.as_deref_mut(), self.secondary.as_deref_mut()]
            .into_iter()
            .flatten()
            .filter(|s| s.is_video())
        {
            if playing {
                source.play();
            } else {
                source.pause();
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        [self.primary.as_deref(), self.secondary.as_deref()]
            .into_iter()
            .flatten()
            .any(|s| s.is_playing())
    }

    /// Stop the live loop (sources paused, clock suspended).
    pub fn suspend(&mut self) {
        self.clock.suspend();
        self.set_playing(false);
    }

    pub fn resume(&mut self, playing: bool) {
        self.clock.resume();
        self.set_playing(playing);
    }
}

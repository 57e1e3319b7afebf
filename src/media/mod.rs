//! Media sources feeding the halftone pipeline.
//!
//! A source is either a still image or a video-like stream with its own
//! clock. Both hand out frames already resampled to the output size.

pub mod sequence;
pub mod still;

pub use sequence::ImageSequence;
pub use still::StillImage;

use async_trait::async_trait;
use halftone_core::RgbaFrame;
use std::path::Path;

use crate::error::MediaError;

/// A primary or secondary input.
///
/// Time-related methods default to a static source that ignores them.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Intrinsic size in pixels.
    fn dimensions(&self) -> (u32, u32);

    fn is_video(&self) -> bool {
        false
    }

    /// Current frame stretched to `width` x `height`.
    fn frame(&self, width: usize, height: usize) -> Result<RgbaFrame, MediaError>;

    /// Playback position in seconds.
    fn current_time(&self) -> f64 {
        0.0
    }

    /// Start a seek. Completion is signalled by [`MediaSource::seeked`].
    fn set_current_time(&mut self, _time: f64) {}

    fn play(&mut self) {}

    fn pause(&mut self) {}

    fn is_playing(&self) -> bool {
        false
    }

    /// Move the source's own clock forward while playing.
    fn advance(&mut self, _dt: f64) {}

    /// Resolves once the last seek has landed.
    async fn seeked(&mut self) {}
}

/// Open a still image file or a directory of frames.
pub fn open(path: impl AsRef<Path>, fps: f64) -> Result<Box<dyn MediaSource>, MediaError> {
    let path = path.as_ref();
    if path.is_dir() {
        Ok(Box::new(ImageSequence::from_dir(path, fps)?))
    } else {
        Ok(Box::new(StillImage::from_path(path)?))
    }
}

/// Aspect ratio (height / width) of a source.
pub fn aspect_ratio(source: &dyn MediaSource) -> Option<f64> {
    let (w, h) = source.dimensions();
    if w == 0 {
        return None;
    }
    Some(h as f64 / w as f64)
}

use async_trait::async_trait;
use halftone_core::RgbaFrame;
use std::path::{Path, PathBuf};
use tiny_skia::Pixmap;

use super::MediaSource;
use crate::error::MediaError;
use crate::rendering::{decode_image, frame_at};

/// A looping video made of still frames shown at a fixed rate.
pub struct ImageSequence {
    frames: Vec<Pixmap>,
    fps: f64,
    time: f64,
    playing: bool,
    seeking: bool,
}

impl ImageSequence {
    /// Build from decoded frames. All frames should share one size; the
    /// first frame defines the reported dimensions.
    pub fn new(frames: Vec<Pixmap>, fps: f64) -> Result<Self, MediaError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(MediaError::InvalidFrameRate(fps));
        }
        if frames.is_empty() {
            return Err(MediaError::EmptySequence("no frames".to_string()));
        }
        Ok(Self {
            frames,
            fps,
            time: 0.0,
            playing: false,
            seeking: false,
        })
    }

    /// Load every `.png` and `.svg` file in `dir`, ordered by file name.
    pub fn from_dir(dir: impl AsRef<Path>, fps: f64) -> Result<Self, MediaError> {
        let dir = dir.as_ref();
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| {
                            ext.eq_ignore_ascii_case("png") || ext.eq_ignore_ascii_case("svg")
                        })
            })
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(MediaError::EmptySequence(dir.display().to_string()));
        }

        let frames = paths
            .iter()
            .map(|path| {
                let data = std::fs::read(path)?;
                decode_image(&data)
                    .map_err(|e| MediaError::Decode(format!("{}: {e}", path.display())))
            })
            .collect::<Result<Vec<_>, MediaError>>()?;

        tracing::info!(
            dir = %dir.display(),
            frames = frames.len(),
            fps,
            "Loaded image sequence"
        );
        Self::new(frames, fps)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Length of one loop in seconds.
    pub fn duration(&self) -> f64 {
        self.frames.len() as f64 / self.fps
    }

    /// Index of the frame shown at the current time.
    pub fn frame_index(&self) -> usize {
        let index = (self.time * self.fps + 1e-9).floor().max(0.0) as usize;
        index % self.frames.len()
    }

    fn wrap(&self, time: f64) -> f64 {
        if !time.is_finite() {
            return 0.0;
        }
        time.rem_euclid(self.duration())
    }
}

#[async_trait]
impl MediaSource for ImageSequence {
    fn dimensions(&self) -> (u32, u32) {
        let first = &self.frames[0];
        (first.width(), first.height())
    }

    fn is_video(&self) -> bool {
        true
    }

    fn frame(&self, width: usize, height: usize) -> Result<RgbaFrame, MediaError> {
        frame_at(&self.frames[self.frame_index()], width, height)
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, time: f64) {
        self.time = self.wrap(time);
        self.seeking = true;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn advance(&mut self, dt: f64) {
        if self.playing && dt > 0.0 {
            self.time = self.wrap(self.time + dt);
        }
    }

    async fn seeked(&mut self) {
        if self.seeking {
            tokio::task::yield_now().await;
            self.seeking = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halftone_core::Rgb;

    fn solid(r: u8) -> Pixmap {
        let mut pixmap = Pixmap::new(4, 2).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, 0, 0, 255));
        pixmap
    }

    fn red_at(seq: &ImageSequence) -> u8 {
        seq.frame(4, 2).unwrap().rgb_at(0, 0).unwrap().r
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            ImageSequence::new(vec![solid(0)], 0.0),
            Err(MediaError::InvalidFrameRate(_))
        ));
        assert!(matches!(
            ImageSequence::new(Vec::new(), 10.0),
            Err(MediaError::EmptySequence(_))
        ));
    }

    #[test]
    fn test_frame_follows_clock_and_loops() {
        let mut seq = ImageSequence::new(vec![solid(10), solid(20), solid(30)], 10.0).unwrap();
        assert_eq!(red_at(&seq), 10);

        // Paused sources do not advance
        seq.advance(0.1);
        assert_eq!(red_at(&seq), 10);

        seq.play();
        seq.advance(0.1);
        assert_eq!(red_at(&seq), 20);
        seq.advance(0.15);
        assert_eq!(red_at(&seq), 30);
        seq.advance(0.1);
        assert_eq!(seq.frame_index(), 0);
        assert!(seq.current_time() < seq.duration());
    }

    #[tokio::test]
    async fn test_seek_wraps_and_resolves() {
        let mut seq = ImageSequence::new(vec![solid(10), solid(20)], 2.0).unwrap();
        seq.set_current_time(1.5);
        seq.seeked().await;
        assert_eq!(red_at(&seq), 20);
        assert!((seq.current_time() - 0.5).abs() < 1e-9);

        seq.set_current_time(-0.5);
        assert!((seq.current_time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_from_dir_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for (name, r) in [("b.png", 20u8), ("a.png", 10), ("c.png", 30)] {
            std::fs::write(dir.path().join(name), solid(r).encode_png().unwrap()).unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut seq = ImageSequence::from_dir(dir.path(), 1.0).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.frame(1, 1).unwrap().rgb_at(0, 0), Some(Rgb::new(10, 0, 0)));
        seq.set_current_time(2.0);
        assert_eq!(red_at(&seq), 30);
    }

    #[test]
    fn test_from_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ImageSequence::from_dir(dir.path(), 30.0),
            Err(MediaError::EmptySequence(_))
        ));
    }
}

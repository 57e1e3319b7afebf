use halftone_core::VectorRecorder;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::studio::Studio;
use crate::error::{MediaError, RenderError};
use crate::media::MediaSource;
use crate::rendering::{frame_file_name, to_svg};

/// One exported frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFrame {
    pub index: usize,
    pub file_name: String,
    pub svg: String,
}

/// Frame-accurate SVG export settings.
#[derive(Debug, Clone, Copy)]
pub struct Exporter {
    pub fps: f64,
    pub seek_timeout: Duration,
}

impl Exporter {
    pub fn new(fps: f64, seek_timeout: Duration) -> Result<Self, MediaError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(MediaError::InvalidFrameRate(fps));
        }
        Ok(Self { fps, seek_timeout })
    }

    /// Capture `count` consecutive frames.
    ///
    /// The live loop is suspended for the duration of the export. Video
    /// sources are rewound to zero, then after each captured frame both
    /// are stepped by `1 / fps` and the next frame waits for both seeks.
    /// Afterwards the loop resumes with the previous play state.
    pub async fn export(
        &self,
        studio: &mut Studio,
        count: usize,
    ) -> Result<Vec<ExportedFrame>, MediaError> {
        let was_playing = studio.is_playing();
        studio.suspend();
        let result = self.capture(studio, count).await;
        studio.resume(was_playing);
        result
    }

    async fn capture(
        &self,
        studio: &mut Studio,
        count: usize,
    ) -> Result<Vec<ExportedFrame>, MediaError> {
        tracing::info!(count, fps = self.fps, "Export started");
        self.seek_all(studio, |_| 0.0).await;

        let step = 1.0 / self.fps;
        let mut recorder = VectorRecorder::new();
        let mut frames = Vec::with_capacity(count);
        for index in 0..count {
            studio.recompute_frame(&mut recorder)?;
            frames.push(ExportedFrame {
                index,
                file_name: frame_file_name(index),
                svg: to_svg(&recorder),
            });
            tracing::debug!(index, dots = recorder.dots().len(), "Frame captured");

            if index + 1 < count {
                self.seek_all(studio, |t| t + step).await;
            }
        }
        tracing::info!(frames = frames.len(), "Export finished");
        Ok(frames)
    }

    /// Seek every video source to `time` and wait for both.
    pub async fn seek_to(&self, studio: &mut Studio, time: f64) {
        self.seek_all(studio, |_| time).await;
    }

    /// Seek every video source to `target(current)` and wait for both.
    async fn seek_all(&self, studio: &mut Studio, target: impl Fn(f64) -> f64) {
        let (primary, secondary) = studio.sources_mut();
        tokio::join!(
            self.seek(primary, &target, "primary"),
            self.seek(secondary, &target, "secondary")
        );
    }

    async fn seek(
        &self,
        source: Option<&mut (dyn MediaSource + 'static)>,
        target: &impl Fn(f64) -> f64,
        slot: &'static str,
    ) {
        let Some(source) = source.filter(|s| s.is_video()) else {
            return;
        };
        let time = target(source.current_time());
        source.set_current_time(time);
        if tokio::time::timeout(self.seek_timeout, source.seeked())
            .await
            .is_err()
        {
            tracing::warn!(
                slot,
                time,
                timeout_ms = self.seek_timeout.as_millis() as u64,
                "Seek timed out, capturing anyway"
            );
        }
    }
}

/// Write exported frames into `dir`, creating it if needed.
pub fn write_frames(dir: impl AsRef<Path>, frames: &[ExportedFrame]) -> Result<Vec<PathBuf>, RenderError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    frames
        .iter()
        .map(|frame| {
            let path = dir.join(&frame.file_name);
            std::fs::write(&path, &frame.svg)?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{ImageSequence, StillImage};
    use crate::models::AppConfig;
    use crate::services::Slot;
    use async_trait::async_trait;
    use halftone_core::{RenderConfig, RgbaFrame};
    use tiny_skia::Pixmap;

    fn gray(level: u8) -> Pixmap {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(level, level, level, 255));
        pixmap
    }

    fn studio() -> Studio {
        let app = AppConfig {
            output_width: 20,
            ..Default::default()
        };
        Studio::seeded(&app, RenderConfig::new().cell_size(10), 1)
    }

    #[tokio::test]
    async fn test_export_steps_video_per_frame() {
        let mut studio = studio();
        // Frames at 30 fps: black, white, black
        let seq = ImageSequence::new(vec![gray(0), gray(255), gray(0)], 30.0).unwrap();
        studio.load(Slot::Primary, Box::new(seq));

        let exporter = Exporter::new(30.0, Duration::from_secs(2)).unwrap();
        let frames = exporter.export(&mut studio, 3).await.unwrap();

        let names: Vec<&str> = frames.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(
            names,
            ["halftone_frame_000.svg", "halftone_frame_001.svg", "halftone_frame_002.svg"]
        );
        let circles: Vec<usize> = frames.iter().map(|f| f.svg.matches("<circle").count()).collect();
        assert_eq!(circles, vec![4, 0, 4]);

        // Live loop resumes with the previous play state
        assert!(studio.is_playing());
        assert!(!studio.clock().is_suspended());
    }

    #[tokio::test]
    async fn test_export_still_repeats_frame() {
        let mut studio = studio();
        studio.load(Slot::Primary, Box::new(StillImage::from_pixmap(gray(0))));

        let exporter = Exporter::new(30.0, Duration::from_secs(2)).unwrap();
        let frames = exporter.export(&mut studio, 2).await.unwrap();
        assert_eq!(frames[0].svg, frames[1].svg);
    }

    struct StuckVideo;

    #[async_trait]
    impl MediaSource for StuckVideo {
        fn dimensions(&self) -> (u32, u32) {
            (4, 4)
        }

        fn is_video(&self) -> bool {
            true
        }

        fn frame(&self, width: usize, height: usize) -> Result<RgbaFrame, MediaError> {
            Ok(RgbaFrame::solid(width, height, halftone_core::Rgb::BLACK))
        }

        async fn seeked(&mut self) {
            std::future::pending::<()>().await;
        }
    }

    #[tokio::test]
    async fn test_seek_timeout_still_captures() {
        let mut studio = studio();
        studio.load(Slot::Primary, Box::new(StuckVideo));

        let exporter = Exporter::new(30.0, Duration::from_millis(50)).unwrap();
        let frames = exporter.export(&mut studio, 2).await.unwrap();
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn test_rejects_bad_frame_rate() {
        assert!(Exporter::new(0.0, Duration::from_secs(1)).is_err());
        assert!(Exporter::new(f64::NAN, Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_write_frames() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![ExportedFrame {
            index: 0,
            file_name: frame_file_name(0),
            svg: "<svg></svg>".to_string(),
        }];
        let paths = write_frames(dir.path().join("out"), &frames).unwrap();
        assert_eq!(std::fs::read_to_string(&paths[0]).unwrap(), "<svg></svg>");
    }
}

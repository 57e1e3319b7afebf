use halftone_core::RgbaFrame;
use std::path::Path;
use tiny_skia::Pixmap;

use super::MediaSource;
use crate::error::MediaError;
use crate::rendering::{decode_image, frame_at};

/// A decoded PNG or SVG image.
pub struct StillImage {
    pixmap: Pixmap,
}

impl StillImage {
    pub fn from_bytes(data: &[u8]) -> Result<Self, MediaError> {
        let pixmap = decode_image(data).map_err(|e| MediaError::Decode(e.to_string()))?;
        Ok(Self { pixmap })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MediaError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let image = Self::from_bytes(&data)?;
        tracing::debug!(
            path = %path.display(),
            width = image.pixmap.width(),
            height = image.pixmap.height(),
            "Loaded still image"
        );
        Ok(image)
    }

    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }
}

impl MediaSource for StillImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn frame(&self, width: usize, height: usize) -> Result<RgbaFrame, MediaError> {
        frame_at(&self.pixmap, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halftone_core::Rgb;

    #[tokio::test]
    async fn test_still_ignores_time() {
        let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
            <rect width="4" height="4" fill="#ffffff"/>
        </svg>"##;
        let mut image = StillImage::from_bytes(svg).unwrap();
        image.play();
        image.advance(1.0);
        image.set_current_time(5.0);
        image.seeked().await;

        assert!(!image.is_playing());
        assert_eq!(image.current_time(), 0.0);
        assert_eq!(image.frame(2, 2).unwrap().rgb_at(1, 1), Some(Rgb::WHITE));
    }

    #[test]
    fn test_undecodable_bytes() {
        assert!(matches!(
            StillImage::from_bytes(b"<html>"),
            Err(MediaError::Decode(_))
        ));
    }
}

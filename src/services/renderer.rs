use halftone_core::{RenderConfig, VectorRecorder};
use std::sync::Arc;

use super::studio::{Slot, Studio};
use crate::error::RenderError;
use crate::media::StillImage;
use crate::models::AppConfig;
use crate::rendering::{to_svg, OutputFormat, RasterCanvas};

/// An encoded frame ready to be sent.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub format: OutputFormat,
    pub width: usize,
    pub height: usize,
    pub dots: usize,
    pub bytes: Vec<u8>,
}

/// One-shot rendering of uploaded images
pub struct RenderService {
    app: Arc<AppConfig>,
}

impl RenderService {
    pub fn new(app: Arc<AppConfig>) -> Self {
        Self { app }
    }

    /// Halftone a still image.
    ///
    /// With `use_as_secondary` the same image also feeds the secondary
    /// color modes. Uses spawn_blocking to keep decoding and rasterizing
    /// off the async runtime.
    pub async fn render(
        &self,
        image: Vec<u8>,
        config: RenderConfig,
        format: OutputFormat,
        use_as_secondary: bool,
    ) -> Result<RenderedFrame, RenderError> {
        let app = self.app.clone();
        tokio::task::spawn_blocking(move || {
            render_blocking(&app, &image, config, format, use_as_secondary)
        })
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
    }
}

fn render_blocking(
    app: &AppConfig,
    image: &[u8],
    config: RenderConfig,
    format: OutputFormat,
    use_as_secondary: bool,
) -> Result<RenderedFrame, RenderError> {
    let mut studio = Studio::new(app, config);
    studio.load(Slot::Primary, Box::new(StillImage::from_bytes(image)?));
    if use_as_secondary {
        studio.load(Slot::Secondary, Box::new(StillImage::from_bytes(image)?));
    }
    let (width, height) = studio.output_size().ok_or(RenderError::NoMedia)?;

    let (dots, bytes) = match format {
        OutputFormat::Png => {
            let mut canvas = RasterCanvas::new();
            let dots = studio.recompute_frame(&mut canvas)?;
            (dots, canvas.to_png()?)
        }
        OutputFormat::Svg => {
            let mut recorder = VectorRecorder::new();
            let dots = studio.recompute_frame(&mut recorder)?;
            (dots, to_svg(&recorder).into_bytes())
        }
    };

    tracing::debug!(width, height, dots, ?format, "Rendered frame");
    Ok(RenderedFrame {
        format,
        width,
        height,
        dots,
        bytes,
    })
}

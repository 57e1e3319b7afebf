pub mod decode;
pub mod dot_shape;
pub mod encode;
pub mod raster;
pub mod svg_export;

pub use decode::{decode_image, frame_at, is_png};
pub use dot_shape::DotShape;
pub use encode::encode_png;
pub use raster::RasterCanvas;
pub use svg_export::{frame_file_name, to_svg};

use serde::Deserialize;
use utoipa::ToSchema;

/// Output encoding of a rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Svg => "image/svg+xml",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

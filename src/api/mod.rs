pub mod render;
pub mod settings;

pub use render::{handle_render, RenderQuery, __path_handle_render};
pub use settings::{
    handle_decode_settings, handle_encode_settings, SettingsCodeResponse,
    __path_handle_decode_settings, __path_handle_encode_settings,
};

use utoipa::OpenApi;

use crate::models::{SettingsJson, StopJson};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Halftone Studio API",
        description = "Halftone dot rendering and shareable settings codes",
        version = "0.1.0"
    ),
    paths(handle_render, handle_decode_settings, handle_encode_settings),
    components(schemas(SettingsJson, StopJson, SettingsCodeResponse)),
    tags(
        (name = "Render", description = "Halftone rendering"),
        (name = "Settings", description = "Settings code conversion"),
    )
)]
pub struct ApiDoc;

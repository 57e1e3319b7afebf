use axum::{
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::models::settings_code;
use crate::rendering::OutputFormat;
use crate::server::AppState;

/// Largest accepted upload
pub const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;

/// Query parameters for the render endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RenderQuery {
    /// Settings code; the server default applies when omitted
    #[serde(default)]
    pub code: Option<String>,
    /// `png` (default) or `svg`
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub format: Option<OutputFormat>,
    /// Also use the uploaded image as the secondary source
    #[serde(default)]
    pub secondary: Option<bool>,
}

/// Halftone an uploaded image
///
/// The request body is a PNG or SVG image. The output keeps the image's
/// aspect ratio at the configured output width.
#[utoipa::path(
    post,
    path = "/api/render",
    request_body(content = Vec<u8>, description = "PNG or SVG image", content_type = "application/octet-stream"),
    params(RenderQuery),
    responses(
        (status = 200, description = "Rendered frame (image/png or image/svg+xml)"),
        (status = 400, description = "Empty body or invalid settings code"),
        (status = 413, description = "Image too large"),
        (status = 422, description = "Image could not be decoded"),
    ),
    tag = "Render"
)]
pub async fn handle_render(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("empty image body".to_string()));
    }

    let config = match query.code.as_deref() {
        Some(code) => settings_code::decode(code)?,
        None => state.config.default_render_config(),
    };
    let format = query.format.unwrap_or_default();

    let frame = state
        .renderer
        .render(body.to_vec(), config, format, query.secondary.unwrap_or(false))
        .await?;

    tracing::info!(
        width = frame.width,
        height = frame.height,
        dots = frame.dots,
        bytes = frame.bytes.len(),
        "Render request served"
    );

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CACHE_CONTROL, "no-store".to_string()),
            (
                header::HeaderName::from_static("x-dot-count"),
                frame.dots.to_string(),
            ),
        ],
        frame.bytes,
    )
        .into_response())
}

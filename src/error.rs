use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::SettingsCodeError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsCodeError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("No media loaded")]
    NoMedia,

    #[error("Render task failed: {0}")]
    Task(String),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Image sequence is empty: {0}")]
    EmptySequence(String),

    #[error("Frame rate must be positive, got {0}")]
    InvalidFrameRate(f64),

    #[error("Failed to decode frame: {0}")]
    Decode(String),

    #[error("Failed to allocate frame of {width}x{height}")]
    FrameAllocation { width: usize, height: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Settings(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Render(RenderError::NoMedia) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Render(
                RenderError::Media(_) | RenderError::ImageDecode(_) | RenderError::SvgParse(_),
            ) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ApiError::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "Request failed");
        } else {
            tracing::debug!(error = %message, status = status.as_u16(), "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

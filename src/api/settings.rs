use axum::{
    extract::Path,
    response::Json,
    Json as JsonExtractor,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{settings_code, SettingsJson};

/// An encoded configuration
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsCodeResponse {
    /// URL-safe settings code
    pub code: String,
    /// The configuration after clamping, as it will be decoded
    pub settings: SettingsJson,
}

/// Decode a settings code
#[utoipa::path(
    get,
    path = "/api/settings/{code}",
    params(
        ("code" = String, Path, description = "Settings code"),
    ),
    responses(
        (status = 200, description = "Decoded configuration", body = SettingsJson),
        (status = 400, description = "Malformed settings code"),
    ),
    tag = "Settings"
)]
pub async fn handle_decode_settings(
    Path(code): Path<String>,
) -> Result<Json<SettingsJson>, ApiError> {
    let config = settings_code::decode(&code)?;
    tracing::debug!(code = %code, "Settings code decoded");
    Ok(Json(SettingsJson::from(&config)))
}

/// Encode a configuration into a settings code
///
/// Numeric fields are clamped into range. Gradients with more than five
/// stops keep their two end stops and the three interior stops closest to
/// the middle.
#[utoipa::path(
    post,
    path = "/api/settings",
    request_body = SettingsJson,
    responses(
        (status = 200, description = "Settings code", body = SettingsCodeResponse),
        (status = 400, description = "Invalid configuration"),
    ),
    tag = "Settings"
)]
pub async fn handle_encode_settings(
    JsonExtractor(settings): JsonExtractor<SettingsJson>,
) -> Result<Json<SettingsCodeResponse>, ApiError> {
    let config = settings.into_config()?;
    let bytes = settings_code::to_bytes(&config);
    let shared = settings_code::from_bytes(&bytes)?;
    let code = settings_code::encode(&config);
    tracing::debug!(code = %code, stops = shared.gradient.len(), "Settings code encoded");
    Ok(Json(SettingsCodeResponse {
        code,
        settings: SettingsJson::from(&shared),
    }))
}

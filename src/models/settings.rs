use halftone_core::{ColorMode, DitherMode, Gradient, GradientStop, RenderConfig, Rgb};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::settings_code::SettingsCodeError;

/// JSON view of a [`RenderConfig`].
///
/// Enum fields use their wire names (`floydSteinberg`, `lumFromSource`, ...)
/// and colors are `#rrggbb` strings. Omitted fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsJson {
    pub brightness: f32,
    pub contrast: f32,
    pub gamma: f32,
    pub blur: f32,
    #[schema(example = "ordered")]
    pub dither: String,
    pub cell_size: usize,
    pub dot_scale: f32,
    pub hue: f32,
    pub invert: bool,
    #[schema(example = "lumFromSource")]
    pub color_mode: String,
    pub gradient: Vec<StopJson>,
}

/// One gradient stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StopJson {
    /// Position along the ramp, 0 to 100
    pub position: f32,
    /// `#rrggbb` or `#rgb`
    #[schema(example = "#ff0000")]
    pub color: String,
}

impl Default for SettingsJson {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for SettingsJson {
    fn from(config: &RenderConfig) -> Self {
        Self {
            brightness: config.brightness,
            contrast: config.contrast,
            gamma: config.gamma,
            blur: config.blur,
            dither: config.dither.as_str().to_string(),
            cell_size: config.cell_size,
            dot_scale: config.dot_scale,
            hue: config.hue,
            invert: config.invert,
            color_mode: config.color_mode.as_str().to_string(),
            gradient: config
                .gradient
                .stops()
                .into_iter()
                .map(|stop| StopJson {
                    position: stop.position,
                    color: stop.color.to_hex(),
                })
                .collect(),
        }
    }
}

impl SettingsJson {
    /// Build a configuration, clamping numeric fields.
    ///
    /// Unknown mode names, malformed colors and gradients with fewer than
    /// two stops are rejected.
    pub fn into_config(self) -> Result<RenderConfig, SettingsCodeError> {
        let dither: DitherMode = self
            .dither
            .parse()
            .map_err(|e| SettingsCodeError::Invalid(format!("{e}")))?;
        let color_mode: ColorMode = self
            .color_mode
            .parse()
            .map_err(|e| SettingsCodeError::Invalid(format!("{e}")))?;

        let stops = self
            .gradient
            .iter()
            .map(|stop| {
                let color: Rgb = stop.color.parse().map_err(|e| {
                    SettingsCodeError::Invalid(format!("color '{}': {e}", stop.color))
                })?;
                Ok(GradientStop::new(stop.position, color))
            })
            .collect::<Result<Vec<_>, SettingsCodeError>>()?;
        let gradient =
            Gradient::new(stops).map_err(|e| SettingsCodeError::Invalid(e.to_string()))?;

        Ok(RenderConfig::new()
            .brightness(self.brightness)
            .contrast(self.contrast)
            .gamma(self.gamma)
            .blur(self.blur)
            .dither(dither)
            .cell_size(self.cell_size)
            .dot_scale(self.dot_scale)
            .hue(self.hue)
            .invert(self.invert)
            .color_mode(color_mode)
            .gradient(gradient))
    }
}

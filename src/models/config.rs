use halftone_core::RenderConfig;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::settings_code;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Logical output width in pixels; height follows the source aspect ratio
    pub output_width: u32,

    /// Synthetic frame rate used by the export loop
    pub export_fps: f64,

    /// Frame loop ticks per second
    pub tick_rate: u32,

    /// Largest elapsed time a single tick may account for
    pub max_frame_delta_ms: u64,

    /// Seconds two video sources may drift apart before being resynced
    pub resync_tolerance: f64,

    /// Upper bound on waiting for a seek during export
    pub seek_timeout_ms: u64,

    /// Settings code applied at startup
    pub default_settings: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_width: 500,
            export_fps: 30.0,
            tick_rate: 60,
            max_frame_delta_ms: 250,
            resync_tolerance: 0.1,
            seek_timeout_ms: 2000,
            default_settings: None,
        }
    }
}

impl AppConfig {
    /// Load from the file named by `CONFIG_FILE`, or defaults when unset.
    pub fn from_env() -> Self {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load(path),
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        output_width = config.output_width,
                        export_fps = config.export_fps,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }

    pub fn max_frame_delta(&self) -> Duration {
        Duration::from_millis(self.max_frame_delta_ms)
    }

    pub fn seek_timeout(&self) -> Duration {
        Duration::from_millis(self.seek_timeout_ms)
    }

    /// Starting render configuration.
    ///
    /// An undecodable `default_settings` code is logged and ignored.
    pub fn default_render_config(&self) -> RenderConfig {
        let Some(code) = self.default_settings.as_deref() else {
            return RenderConfig::default();
        };
        match settings_code::decode(code) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(%e, code, "Invalid default_settings code, using defaults");
                RenderConfig::default()
            }
        }
    }
}

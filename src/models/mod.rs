pub mod config;
pub mod settings;
pub mod settings_code;

pub use config::AppConfig;
pub use settings::{SettingsJson, StopJson};
pub use settings_code::{decode, encode, SettingsCodeError};

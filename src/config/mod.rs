//! Runtime configuration

pub mod settings;

pub use settings::{Settings, SettingsError, ScatterSettings, load_settings, load_settings_from, settings_path, SETTINGS_ENV};

//! User settings
//!
//! Read from a RON file at startup. A missing file means defaults; a
//! broken one is logged and also means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::SlotMetrics;

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "WAYFARER_SETTINGS";

const SETTINGS_FILE: &str = "settings.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// How many decorations and items are scattered at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterSettings {
    pub green_barriers: usize,
    /// Green barriers land in `[0, barrier_extent)` on both axes
    pub barrier_extent: f32,
    pub red_barriers: usize,
    pub red_barrier_spacing: f32,
    pub items: usize,
    /// Scattered items land in `[0, item_extent]` on both axes
    pub item_extent: u32,
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            green_barriers: 100,
            barrier_extent: 1000.0,
            red_barriers: 10,
            red_barrier_spacing: 100.0,
            items: 10,
            item_extent: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical screen size in pixels
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub target_fps: u32,
    /// Fixed RNG seed; random each run when absent
    pub seed: Option<u64>,
    pub scatter: ScatterSettings,
    pub inventory_width: u8,
    pub inventory_height: u8,
    pub slot_metrics: SlotMetrics,
    /// Paint barriers while the pointer is held
    pub drawing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 800.0,
            target_fps: 80,
            seed: None,
            scatter: ScatterSettings::default(),
            inventory_width: 5,
            inventory_height: 2,
            slot_metrics: SlotMetrics::default(),
            drawing: false,
        }
    }
}

impl Settings {
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "viewport must be positive, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if self.target_fps == 0 {
            return Err(SettingsError::Invalid("target_fps must be at least 1".into()));
        }
        if self.inventory_width == 0 || self.inventory_height == 0 {
            return Err(SettingsError::Invalid("inventory needs at least one slot".into()));
        }
        Ok(())
    }

    /// Read settings from a file; `Ok(None)` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>, SettingsError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = ron::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(Some(settings))
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, ron).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Settings saved to {:?}", path);
        Ok(())
    }
}

/// Get the settings file path
pub fn settings_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(path) = std::env::var_os(SETTINGS_ENV) {
        return PathBuf::from(path);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "wayfarer", "Wayfarer") {
        proj_dirs.config_dir().join(SETTINGS_FILE)
    } else {
        PathBuf::from(".").join(SETTINGS_FILE)
    }
}

/// Load settings (or defaults)
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub fn load_settings_from(path: &Path) -> Settings {
    match Settings::load(path) {
        Ok(Some(settings)) => {
            log::info!("Settings loaded from {:?}", path);
            settings
        }
        Ok(None) => {
            log::info!("No settings at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            log::warn!("{}, using defaults", e);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wayfarer-settings-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join(SETTINGS_FILE)
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.viewport(), Vec2::new(800.0, 800.0));
        assert_eq!(settings.target_fps, 80);
        assert_eq!((settings.inventory_width, settings.inventory_height), (5, 2));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_file("roundtrip");
        let settings = Settings { seed: Some(7), drawing: true, ..Settings::default() };
        settings.save(&path).unwrap();

        assert_eq!(load_settings_from(&path), settings);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = scratch_file("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "(target_fps: 30)").unwrap();

        let settings = load_settings_from(&path);
        assert_eq!(settings.target_fps, 30);
        assert_eq!(settings.viewport_width, 800.0);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let path = scratch_file("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "(viewport_width: -1.0)").unwrap();

        assert!(matches!(Settings::load(&path), Err(SettingsError::Invalid(_))));
        assert_eq!(load_settings_from(&path), Settings::default());

        fs::write(&path, "(viewport_width: ").unwrap();
        assert!(matches!(Settings::load(&path), Err(SettingsError::Parse { .. })));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = scratch_file("missing");
        assert!(matches!(Settings::load(&path), Ok(None)));
    }
}

//! RON data loader
//!
//! Loads game data from external RON files, with fallback to hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::items::{ItemCatalog, default_item_catalog};

/// Default location of the data files, relative to the working directory
pub const DATA_DIR: &str = "assets/data";

const ITEMS_FILE: &str = "items.ron";

/// Errors raised while reading or writing data files
#[derive(Debug, Error)]
pub enum CatalogError {
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
    #[error("failed to serialize data: {0}")]
    Serialize(#[from] ron::Error),
    #[error("{0} has an empty rarity or type table")]
    Incomplete(PathBuf),
}

/// Manages all external game data
#[derive(Debug, Clone, Default)]
pub struct DataManager {
    /// Item catalog
    pub items: ItemCatalog,
}

impl DataManager {
    /// Load from the default data directory, falling back to defaults
    pub fn new() -> Self {
        Self::load_from(Path::new(DATA_DIR))
    }

    /// Load from a directory, falling back to defaults per file
    pub fn load_from(base_path: &Path) -> Self {
        let items = match Self::load_items(base_path) {
            Ok(Some(catalog)) => catalog,
            Ok(None) => default_item_catalog(),
            Err(e) => {
                log::warn!("{}. Using default item catalog.", e);
                default_item_catalog()
            }
        };

        Self { items }
    }

    /// Load the item catalog; `Ok(None)` when the file does not exist
    pub fn load_items(base_path: &Path) -> Result<Option<ItemCatalog>, CatalogError> {
        let path = base_path.join(ITEMS_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        let catalog: ItemCatalog = ron::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.clone(),
            source,
        })?;

        if !catalog.is_usable() {
            return Err(CatalogError::Incomplete(path));
        }

        log::info!("Loaded item catalog from {}", path.display());
        Ok(Some(catalog))
    }

    /// Get the item catalog
    pub fn item_catalog(&self) -> &ItemCatalog {
        &self.items
    }
}

/// Export the default data to RON files for easy editing
pub fn export_default_data(base_path: &Path) -> Result<(), CatalogError> {
    fs::create_dir_all(base_path).map_err(|source| CatalogError::Io {
        path: base_path.to_path_buf(),
        source,
    })?;

    let items_ron = ron::ser::to_string_pretty(&default_item_catalog(), ron::ser::PrettyConfig::default())?;
    let path = base_path.join(ITEMS_FILE);
    fs::write(&path, items_ron).map_err(|source| CatalogError::Io { path, source })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wayfarer-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_export_then_load() {
        let dir = scratch_dir("export");
        let result = export_default_data(&dir);
        assert!(result.is_ok(), "Failed to export default data: {:?}", result.err());
        assert!(dir.join(ITEMS_FILE).exists(), "items.ron not created");

        let manager = DataManager::load_from(&dir);
        assert_eq!(manager.items, default_item_catalog());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = scratch_dir("missing");
        assert!(matches!(DataManager::load_items(&dir), Ok(None)));
        assert!(DataManager::load_from(&dir).items.is_usable());
    }

    #[test]
    fn test_broken_file_is_reported() {
        let dir = scratch_dir("broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(ITEMS_FILE), "(rarities: [").unwrap();

        assert!(matches!(DataManager::load_items(&dir), Err(CatalogError::Parse { .. })));
        assert_eq!(DataManager::load_from(&dir).items, default_item_catalog());

        let _ = fs::remove_dir_all(&dir);
    }
}

//! Data loading and external game content
//!
//! This module handles loading game data from external RON files,
//! allowing for data-driven content and easy modding.

pub mod loader;
pub mod items;

pub use loader::{DataManager, CatalogError, export_default_data};
pub use items::{ItemCatalog, RarityDef, ItemTypeDef, TypeNameDef, default_item_catalog};

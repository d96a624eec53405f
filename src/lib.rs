//! Wayfarer - a top-down scrolling sandbox
//!
//! Walk a map that scrolls around the player, pick items up off the
//! ground, and drag them between your own inventory and the inventories
//! of furnaces and other stations.

pub mod geometry;
pub mod items;
pub mod entities;
pub mod world;
pub mod interaction;
pub mod render;
pub mod ui;
pub mod config;
pub mod data;

// Re-export commonly used types
pub use config::Settings;
pub use world::{World, InventoryKey, build_world};
pub use items::{Item, ItemId, Inventory};

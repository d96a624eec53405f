//! Item system
//!
//! Items live in an `ItemStore` arena and move between the map, the
//! player's hand, and inventory slots.

pub mod item;
pub mod factory;
pub mod store;
pub mod grid;
pub mod inventory;

pub use item::{Item, ItemId, ItemLocation, ItemType, Rarity, ImageHandle, ICON_SIZE, MAP_IMAGE_SIZE};
pub use factory::{ItemTemplate, create_item, create_random_item, choose_image};
pub use store::ItemStore;
pub use grid::{SlotGrid, SlotPos};
pub use inventory::{Inventory, InventoryError, SlotMetrics, Anchor, PlaceOutcome, PERSONAL_INVENTORY_OFFSET};

//! World module
//!
//! The world state and the layout it starts from.

pub mod state;
pub mod setup;

pub use state::{World, InventoryKey, WorldSnapshot, SlotSnapshot};
pub use setup::{build_world, FURNACE_POSITIONS, FIRST_ITEM_POSITION};

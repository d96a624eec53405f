//! Item arena
//!
//! Items are never destroyed, so an `ItemId` is a plain index that stays
//! valid for the lifetime of the world. Iteration order is insertion order.

use super::item::{Item, ItemId};

#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an item and assign its id
    pub fn insert(&mut self, mut item: Item) -> ItemId {
        let id = ItemId(self.items.len());
        item.id = id;
        self.items.push(item);
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut()
    }
}

//! Slot grid storage
//!
//! A fixed `width × height` grid where each slot holds at most one item.
//! Every scan walks the grid column by column (x outer, y inner), so
//! "first" always means first in that order.

use serde::{Deserialize, Serialize};
use super::item::ItemId;

/// Position in the inventory grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotPos {
    pub x: u8,
    pub y: u8,
}

impl SlotPos {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Grid of optional item references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrid {
    width: u8,
    height: u8,
    /// Column-major cell storage
    cells: Vec<Option<ItemId>>,
}

impl SlotGrid {
    /// Create a new empty grid
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Check if a position is valid within the grid
    pub fn is_valid_position(&self, pos: SlotPos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: SlotPos) -> usize {
        pos.x as usize * self.height as usize + pos.y as usize
    }

    /// Get the item in a slot
    pub fn get(&self, pos: SlotPos) -> Option<ItemId> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.cells[self.index(pos)]
    }

    pub fn is_empty_at(&self, pos: SlotPos) -> bool {
        self.is_valid_position(pos) && self.cells[self.index(pos)].is_none()
    }

    /// Put an item into a slot, returning what was there before
    ///
    /// Out-of-range positions are ignored.
    pub fn set(&mut self, pos: SlotPos, item: Option<ItemId>) -> Option<ItemId> {
        if !self.is_valid_position(pos) {
            return None;
        }
        let idx = self.index(pos);
        std::mem::replace(&mut self.cells[idx], item)
    }

    /// All slot positions in scan order
    pub fn positions(&self) -> impl Iterator<Item = SlotPos> {
        let (width, height) = (self.width, self.height);
        (0..width).flat_map(move |x| (0..height).map(move |y| SlotPos::new(x, y)))
    }

    /// Occupied slots in scan order
    pub fn occupied(&self) -> impl Iterator<Item = (SlotPos, ItemId)> + '_ {
        self.positions()
            .filter_map(move |pos| self.cells[self.index(pos)].map(|id| (pos, id)))
    }

    /// First empty slot in scan order
    pub fn first_empty(&self) -> Option<SlotPos> {
        self.positions().find(|&pos| self.cells[self.index(pos)].is_none())
    }

    /// Number of occupied slots
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Every slot holding `id`
    pub fn positions_of(&self, id: ItemId) -> Vec<SlotPos> {
        self.occupied()
            .filter(|&(_, other)| other == id)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Empty every slot holding `id`, returning how many were cleared
    pub fn remove_all(&mut self, id: ItemId) -> usize {
        let mut removed = 0;
        for cell in self.cells.iter_mut() {
            if *cell == Some(id) {
                *cell = None;
                removed += 1;
            }
        }
        removed
    }
}

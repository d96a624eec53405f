//! Inventory system
//!
//! An inventory is a slot grid plus the geometry needed to draw it and to
//! resolve pointer positions against it. The personal inventory sits at a
//! fixed screen offset; world inventories are pinned to a map position and
//! scroll with the camera.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::Player;
use crate::geometry::{Camera, ScreenRect};
use crate::render::{Rgb, Surface};
use super::grid::{SlotGrid, SlotPos};
use super::item::{Item, ItemId};
use super::store::ItemStore;

const BACKGROUND_COLOR: Rgb = (255, 255, 255);
const BORDER_COLOR: Rgb = (0, 150, 0);
const SLOT_BORDER_COLOR: Rgb = (250, 180, 0);
const SLOT_COLOR: Rgb = (0, 100, 0);

/// Vertical distance from the bottom of the viewport to the personal inventory
pub const PERSONAL_INVENTORY_OFFSET: f32 = 130.0;

/// Inventory consistency errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("item {0} is not in this inventory")]
    ItemNotInGrid(ItemId),
    #[error("inventory is full")]
    Full,
}

/// Pixel layout of an inventory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotMetrics {
    /// Border around the whole inventory
    pub border_width: f32,
    pub slot_size: f32,
    /// Gap between neighbouring slots
    pub slot_spacing: f32,
    /// Border drawn inside each slot
    pub slot_border_width: f32,
    /// Extra margin around a slot when dropping onto it
    pub drop_padding: f32,
}

impl Default for SlotMetrics {
    fn default() -> Self {
        Self {
            border_width: 5.0,
            slot_size: 55.0,
            slot_spacing: 10.0,
            slot_border_width: 5.0,
            drop_padding: 1.0,
        }
    }
}

impl SlotMetrics {
    /// Distance between the corners of neighbouring slots
    pub fn pitch(&self) -> f32 {
        self.slot_size + self.slot_spacing
    }
}

/// Where an inventory's top-left corner lives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Anchor {
    /// Fixed screen position, independent of the camera
    Screen(Vec2),
    /// Map position, converted through the camera every call
    Map(Vec2),
}

/// Result of dropping a held item over an inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// Item went into a slot; `redirected` when the targeted slot was taken
    Slotted { slot: SlotPos, redirected: bool },
    /// Pointer was not over any slot, item is on the ground
    Dropped,
    /// Targeted slot was taken and no slot was free, item is on the ground
    InventoryFull,
    /// Item was already slotted, nothing changed
    Skipped,
}

impl PlaceOutcome {
    pub fn is_slotted(&self) -> bool {
        matches!(self, PlaceOutcome::Slotted { .. })
    }
}

/// A grid inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    grid: SlotGrid,
    anchor: Anchor,
    open: bool,
    metrics: SlotMetrics,
}

impl Inventory {
    /// Create an inventory with an explicit anchor
    pub fn new(width: u8, height: u8, anchor: Anchor, metrics: SlotMetrics) -> Self {
        Self {
            grid: SlotGrid::new(width, height),
            anchor,
            open: false,
            metrics,
        }
    }

    /// The player's inventory, docked to the bottom-left of the viewport
    pub fn personal(width: u8, height: u8, viewport: Vec2, metrics: SlotMetrics) -> Self {
        let anchor = Anchor::Screen(Vec2::new(0.0, viewport.y - PERSONAL_INVENTORY_OFFSET));
        Self::new(width, height, anchor, metrics)
    }

    /// An inventory pinned to a map position
    pub fn at_map(width: u8, height: u8, map_position: Vec2, metrics: SlotMetrics) -> Self {
        Self::new(width, height, Anchor::Map(map_position), metrics)
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn metrics(&self) -> &SlotMetrics {
        &self.metrics
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    /// Grid dimensions in slots
    pub fn dimensions(&self) -> (u8, u8) {
        (self.grid.width(), self.grid.height())
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Screen position of the inventory's top-left corner
    pub fn screen_origin(&self, camera: &Camera) -> Vec2 {
        match self.anchor {
            Anchor::Screen(pos) => pos,
            Anchor::Map(pos) => camera.map_to_screen(pos),
        }
    }

    /// Screen position of a slot's top-left corner
    pub fn slot_top_left(&self, x: u8, y: u8, camera: &Camera) -> Vec2 {
        let origin = self.screen_origin(camera);
        origin + Vec2::splat(self.metrics.border_width) + Vec2::new(x as f32, y as f32) * self.metrics.pitch()
    }

    /// Screen rectangle of a slot
    pub fn slot_rect(&self, pos: SlotPos, camera: &Camera) -> ScreenRect {
        ScreenRect::from_pos_size(
            self.slot_top_left(pos.x, pos.y, camera),
            Vec2::splat(self.metrics.slot_size),
        )
    }

    pub fn bottom_right_corner(&self, camera: &Camera) -> Vec2 {
        let (w, h) = self.dimensions();
        self.screen_origin(camera)
            + Vec2::splat(2.0 * self.metrics.border_width)
            + Vec2::new(w as f32, h as f32) * self.metrics.pitch()
            - Vec2::splat(self.metrics.slot_spacing)
    }

    /// Screen rectangle covered by the whole inventory
    pub fn bounds(&self, camera: &Camera) -> ScreenRect {
        ScreenRect::from_corners(self.screen_origin(camera), self.bottom_right_corner(camera))
    }

    /// Strictly inside the inventory; points on the edge are outside
    pub fn contains_point(&self, p: Vec2, camera: &Camera) -> bool {
        self.bounds(camera).contains_strict(p)
    }

    // ------------------------------------------------------------------
    // Contents
    // ------------------------------------------------------------------

    pub fn find_first_empty_slot(&self) -> Option<SlotPos> {
        self.grid.first_empty()
    }

    pub fn count_items(&self) -> usize {
        self.grid.count()
    }

    pub fn get(&self, pos: SlotPos) -> Option<ItemId> {
        self.grid.get(pos)
    }

    /// Contained items in slot order
    pub fn items(&self) -> impl Iterator<Item = (SlotPos, ItemId)> + '_ {
        self.grid.occupied()
    }

    pub fn contains_item(&self, id: ItemId) -> bool {
        self.items().any(|(_, other)| other == id)
    }

    /// Hit box of a contained item, matching where it is drawn
    pub fn item_hit_box(&self, item: &Item, camera: &Camera) -> ScreenRect {
        match self.anchor {
            Anchor::Screen(_) => item.bounding_box_in_personal_inventory(),
            Anchor::Map(_) => item.bounding_box_in_inventory(camera),
        }
    }

    /// First contained item (slot order) whose icon is under the pointer
    pub fn item_at(&self, pointer: Vec2, items: &ItemStore, camera: &Camera) -> Option<ItemId> {
        self.items()
            .filter_map(|(_, id)| items.get(id))
            .find(|item| self.item_hit_box(item, camera).contains(pointer))
            .map(|item| item.id)
    }

    /// Put an item into a specific slot and anchor it there
    fn put(&mut self, slot: SlotPos, item: &mut Item, camera: &Camera) {
        self.grid.set(slot, Some(item.id));
        item.settle_in_slot(self.slot_top_left(slot.x, slot.y, camera), camera);
    }

    /// Store an item in the first empty slot
    pub fn stash(&mut self, item: &mut Item, camera: &Camera) -> Result<SlotPos, InventoryError> {
        let slot = self.find_first_empty_slot().ok_or(InventoryError::Full)?;
        self.put(slot, item, camera);
        log::debug!("Stashed {} in slot ({}, {})", item.name, slot.x, slot.y);
        Ok(slot)
    }

    /// Lift a contained item into the actor's hand
    ///
    /// Every slot holding the item is cleared. An item that is not in the
    /// grid is left untouched and reported.
    pub fn move_to_hand(&mut self, item: &mut Item, pointer: Vec2, actor: &mut Player) -> Result<(), InventoryError> {
        let cleared = self.grid.remove_all(item.id);
        if cleared == 0 {
            log::error!("Item {} ({}) is not in the inventory it was picked from", item.id, item.name);
            return Err(InventoryError::ItemNotInGrid(item.id));
        }
        if cleared > 1 {
            log::error!("Item {} ({}) occupied {} slots, all cleared", item.id, item.name, cleared);
        }

        item.take_in_hand(pointer);
        actor.hold(item.id);
        log::debug!("Picked up {} from inventory", item.name);
        Ok(())
    }

    /// Drop a held item over this inventory
    ///
    /// The item lands on the ground at the actor's position unless the
    /// pointer is over a slot (padded by `drop_padding`). An occupied
    /// target redirects to the first empty slot. Slots are tested in scan
    /// order and the first padded rectangle containing the pointer wins,
    /// so overlapping padding resolves toward the earlier slot.
    pub fn place_item(&mut self, item: &mut Item, pointer: Vec2, actor: &mut Player, viewport: Vec2) -> PlaceOutcome {
        if item.is_in_inventory() {
            log::debug!("{} is already slotted, skipping placement", item.name);
            return PlaceOutcome::Skipped;
        }

        let camera = Camera::new(actor.position, viewport);

        item.drop_at(actor.position);
        actor.clear_hand();

        let positions: Vec<SlotPos> = self.grid.positions().collect();
        for pos in positions {
            let target = self.slot_rect(pos, &camera).expand(self.metrics.drop_padding);
            if !target.contains_strict(pointer) {
                continue;
            }

            if self.grid.is_empty_at(pos) {
                self.put(pos, item, &camera);
                return PlaceOutcome::Slotted { slot: pos, redirected: false };
            }

            return match self.find_first_empty_slot() {
                Some(slot) => {
                    self.put(slot, item, &camera);
                    PlaceOutcome::Slotted { slot, redirected: true }
                }
                None => {
                    log::info!("Inventory full, no empty slot found for {}, dropping it to the ground", item.name);
                    PlaceOutcome::InventoryFull
                }
            };
        }

        PlaceOutcome::Dropped
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn render(&self, surface: &mut dyn Surface, items: &ItemStore, camera: &Camera) {
        let bounds = self.bounds(camera);
        surface.fill_rect(bounds, BACKGROUND_COLOR);
        surface.stroke_rect(bounds, self.metrics.border_width, BORDER_COLOR);

        for pos in self.grid.positions() {
            let rect = self.slot_rect(pos, camera);
            surface.fill_rect(rect, SLOT_COLOR);
            surface.stroke_rect(rect, self.metrics.slot_border_width, SLOT_BORDER_COLOR);

            if let Some(item) = self.grid.get(pos).and_then(|id| items.get(id)) {
                item.render_icon(surface, rect.top_left());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::data::default_item_catalog;
    use crate::items::{create_random_item, ItemLocation};
    use crate::render::{DrawCommand, DrawList};

    const VIEWPORT: Vec2 = Vec2::new(800.0, 800.0);

    fn make_store(count: usize) -> ItemStore {
        let catalog = default_item_catalog();
        let mut rng = StdRng::seed_from_u64(42);
        let mut store = ItemStore::new();
        for _ in 0..count {
            let item = create_random_item(&catalog, Vec2::ZERO, &mut rng).unwrap();
            store.insert(item);
        }
        store
    }

    fn camera_for(player: &Player) -> Camera {
        Camera::new(player.position, VIEWPORT)
    }

    /// Put an item in hand the way the controller does before a release
    fn pick_up(store: &mut ItemStore, id: ItemId, player: &mut Player) {
        store.get_mut(id).unwrap().take_in_hand(Vec2::ZERO);
        player.hold(id);
    }

    #[test]
    fn test_personal_geometry() {
        let inv = Inventory::personal(5, 2, VIEWPORT, SlotMetrics::default());
        let camera = Camera::new(Vec2::new(1234.0, -50.0), VIEWPORT);

        assert_eq!(inv.screen_origin(&camera), Vec2::new(0.0, 670.0));
        assert_eq!(inv.slot_top_left(0, 0, &camera), Vec2::new(5.0, 675.0));
        assert_eq!(inv.slot_top_left(2, 1, &camera), Vec2::new(135.0, 740.0));
        assert_eq!(inv.bottom_right_corner(&camera), Vec2::new(325.0, 800.0));
    }

    #[test]
    fn test_world_inventory_scrolls() {
        let inv = Inventory::at_map(1, 1, Vec2::new(100.0, 100.0), SlotMetrics::default());

        let camera = Camera::new(Vec2::new(400.0, 400.0), VIEWPORT);
        assert_eq!(inv.slot_top_left(0, 0, &camera), Vec2::new(105.0, 105.0));

        let camera = Camera::new(Vec2::new(450.0, 380.0), VIEWPORT);
        assert_eq!(inv.slot_top_left(0, 0, &camera), Vec2::new(55.0, 125.0));
        assert_eq!(inv.bottom_right_corner(&camera), Vec2::new(115.0, 185.0));
    }

    #[test]
    fn test_contains_point_is_strict() {
        let inv = Inventory::personal(5, 2, VIEWPORT, SlotMetrics::default());
        let camera = Camera::new(Vec2::ZERO, VIEWPORT);

        assert!(inv.contains_point(Vec2::new(10.0, 700.0), &camera));
        assert!(!inv.contains_point(Vec2::new(0.0, 700.0), &camera));
        assert!(!inv.contains_point(Vec2::new(10.0, 670.0), &camera));
        assert!(!inv.contains_point(Vec2::new(325.0, 700.0), &camera));
        assert!(!inv.contains_point(Vec2::new(10.0, 800.0), &camera));
    }

    #[test]
    fn test_find_first_empty_slot() {
        let mut store = make_store(2);
        let mut inv = Inventory::personal(1, 2, VIEWPORT, SlotMetrics::default());
        let camera = Camera::new(Vec2::ZERO, VIEWPORT);

        assert_eq!(inv.find_first_empty_slot(), Some(SlotPos::new(0, 0)));
        inv.stash(store.get_mut(ItemId(0)).unwrap(), &camera).unwrap();
        inv.stash(store.get_mut(ItemId(1)).unwrap(), &camera).unwrap();
        assert_eq!(inv.find_first_empty_slot(), None);
        assert_eq!(inv.count_items(), 2);
    }

    #[test]
    fn test_place_at_slot_corner() {
        let mut store = make_store(1);
        let mut player = Player::new(Vec2::new(400.0, 400.0));
        let mut inv = Inventory::personal(5, 2, VIEWPORT, SlotMetrics::default());
        let camera = camera_for(&player);
        let corner = inv.slot_top_left(2, 1, &camera);

        pick_up(&mut store, ItemId(0), &mut player);
        let item = store.get_mut(ItemId(0)).unwrap();
        let outcome = inv.place_item(item, corner, &mut player, VIEWPORT);

        assert_eq!(outcome, PlaceOutcome::Slotted { slot: SlotPos::new(2, 1), redirected: false });
        assert_eq!(inv.get(SlotPos::new(2, 1)), Some(ItemId(0)));
        assert_eq!(inv.count_items(), 1);

        let item = store.get(ItemId(0)).unwrap();
        assert_eq!(item.location(), ItemLocation::InInventory);
        assert_eq!(item.screen_position, corner);
        assert_eq!(item.map_position, camera.screen_to_map(corner));
        assert_eq!(player.held(), None);
    }

    #[test]
    fn test_place_padding_edges() {
        let mut store = make_store(1);
        let mut player = Player::new(Vec2::new(400.0, 400.0));
        let mut inv = Inventory::personal(5, 2, VIEWPORT, SlotMetrics::default());
        let corner = inv.slot_top_left(0, 0, &camera_for(&player));

        // Exactly one padding pixel outside the slot is not a hit
        pick_up(&mut store, ItemId(0), &mut player);
        let item = store.get_mut(ItemId(0)).unwrap();
        let outcome = inv.place_item(item, corner - Vec2::splat(1.0), &mut player, VIEWPORT);
        assert_eq!(outcome, PlaceOutcome::Dropped);

        // Half a pixel outside still lands inside the padding
        pick_up(&mut store, ItemId(0), &mut player);
        let item = store.get_mut(ItemId(0)).unwrap();
        let outcome = inv.place_item(item, corner - Vec2::splat(0.5), &mut player, VIEWPORT);
        assert!(outcome.is_slotted());
    }

    #[test]
    fn test_place_between_slots_drops() {
        let mut store = make_store(1);
        let mut player = Player::new(Vec2::new(400.0, 400.0));
        let mut inv = Inventory::personal(5, 2, VIEWPORT, SlotMetrics::default());
        let camera = camera_for(&player);
        // In the spacing gap between (0,0) and (1,0)
        let gap = inv.slot_top_left(0, 0, &camera) + Vec2::new(60.0, 20.0);

        pick_up(&mut store, ItemId(0), &mut player);
        let item = store.get_mut(ItemId(0)).unwrap();
        assert_eq!(inv.place_item(item, gap, &mut player, VIEWPORT), PlaceOutcome::Dropped);

        let item = store.get(ItemId(0)).unwrap();
        assert!(item.is_on_map());
        assert_eq!(item.map_position, player.position);
        assert_eq!(inv.count_items(), 0);
    }

    #[test]
    fn test_place_on_occupied_redirects() {
        let mut store = make_store(2);
        let mut player = Player::new(Vec2::new(400.0, 400.0));
        let mut inv = Inventory::personal(5, 2, VIEWPORT, SlotMetrics::default());
        let camera = camera_for(&player);

        inv.stash(store.get_mut(ItemId(0)).unwrap(), &camera).unwrap();
        let target = inv.slot_top_left(0, 0, &camera) + Vec2::splat(10.0);

        pick_up(&mut store, ItemId(1), &mut player);
        let item = store.get_mut(ItemId(1)).unwrap();
        let outcome = inv.place_item(item, target, &mut player, VIEWPORT);

        assert_eq!(outcome, PlaceOutcome::Slotted { slot: SlotPos::new(0, 1), redirected: true });
        assert_eq!(inv.count_items(), 2);
        assert_eq!(store.get(ItemId(1)).unwrap().screen_position, inv.slot_top_left(0, 1, &camera));
    }

    #[test]
    fn test_place_on_full_inventory_drops() {
        let mut store = make_store(2);
        let mut player = Player::new(Vec2::new(321.0, 654.0));
        let mut inv = Inventory::at_map(1, 1, Vec2::new(100.0, 100.0), SlotMetrics::default());
        let camera = camera_for(&player);

        inv.stash(store.get_mut(ItemId(0)).unwrap(), &camera).unwrap();
        let target = inv.slot_top_left(0, 0, &camera) + Vec2::splat(20.0);

        pick_up(&mut store, ItemId(1), &mut player);
        let item = store.get_mut(ItemId(1)).unwrap();
        assert_eq!(inv.place_item(item, target, &mut player, VIEWPORT), PlaceOutcome::InventoryFull);

        let b = store.get(ItemId(1)).unwrap();
        assert!(b.is_on_map());
        assert_eq!(b.map_position, Vec2::new(321.0, 654.0));
        assert_eq!(inv.count_items(), 1);
        assert_eq!(inv.get(SlotPos::new(0, 0)), Some(ItemId(0)));
        assert!(!player.is_holding());
    }

    #[test]
    fn test_place_slotted_item_is_skipped() {
        let mut store = make_store(1);
        let mut player = Player::new(Vec2::ZERO);
        let mut inv = Inventory::personal(2, 1, VIEWPORT, SlotMetrics::default());
        let mut other = Inventory::personal(2, 1, VIEWPORT, SlotMetrics::default());
        let camera = camera_for(&player);

        inv.stash(store.get_mut(ItemId(0)).unwrap(), &camera).unwrap();
        let target = other.slot_top_left(1, 0, &camera);
        let item = store.get_mut(ItemId(0)).unwrap();

        assert_eq!(other.place_item(item, target, &mut player, VIEWPORT), PlaceOutcome::Skipped);
        assert_eq!(other.count_items(), 0);
        assert!(store.get(ItemId(0)).unwrap().is_in_inventory());
    }

    #[test]
    fn test_move_to_hand() {
        let mut store = make_store(1);
        let mut player = Player::new(Vec2::new(400.0, 400.0));
        let mut inv = Inventory::personal(5, 2, VIEWPORT, SlotMetrics::default());
        let camera = camera_for(&player);

        inv.stash(store.get_mut(ItemId(0)).unwrap(), &camera).unwrap();
        let pointer = Vec2::new(20.0, 690.0);

        let item = store.get_mut(ItemId(0)).unwrap();
        assert!(inv.move_to_hand(item, pointer, &mut player).is_ok());

        let item = store.get(ItemId(0)).unwrap();
        assert_eq!(item.location(), ItemLocation::InHand);
        assert_eq!(item.screen_position, pointer);
        assert_eq!(player.held(), Some(ItemId(0)));
        assert_eq!(inv.count_items(), 0);
    }

    #[test]
    fn test_move_to_hand_missing_item() {
        let mut store = make_store(1);
        let mut player = Player::new(Vec2::ZERO);
        let mut inv = Inventory::personal(1, 1, VIEWPORT, SlotMetrics::default());

        let item = store.get_mut(ItemId(0)).unwrap();
        let result = inv.move_to_hand(item, Vec2::ZERO, &mut player);

        assert_eq!(result, Err(InventoryError::ItemNotInGrid(ItemId(0))));
        assert!(store.get(ItemId(0)).unwrap().is_on_map());
        assert!(!player.is_holding());
    }

    #[test]
    fn test_item_at_uses_anchor_hit_box() {
        let mut store = make_store(1);
        let player = Player::new(Vec2::new(400.0, 400.0));
        let mut inv = Inventory::at_map(1, 1, Vec2::new(100.0, 100.0), SlotMetrics::default());
        let camera = camera_for(&player);

        inv.stash(store.get_mut(ItemId(0)).unwrap(), &camera).unwrap();
        assert_eq!(inv.item_at(Vec2::new(110.0, 110.0), &store, &camera), Some(ItemId(0)));
        // Slot corner is inside, icon edge (50 px) is not
        assert_eq!(inv.item_at(Vec2::new(155.0, 110.0), &store, &camera), None);

        // After the player walks right the icon moves left with the inventory
        let moved = Camera::new(Vec2::new(430.0, 400.0), VIEWPORT);
        assert_eq!(inv.item_at(Vec2::new(80.0, 110.0), &store, &moved), Some(ItemId(0)));
    }

    #[test]
    fn test_render_is_read_only() {
        let mut store = make_store(1);
        let mut inv = Inventory::personal(2, 1, VIEWPORT, SlotMetrics::default());
        let camera = Camera::new(Vec2::ZERO, VIEWPORT);
        inv.stash(store.get_mut(ItemId(0)).unwrap(), &camera).unwrap();

        let before = store.get(ItemId(0)).unwrap().screen_position;
        let mut list = DrawList::new();
        inv.render(&mut list, &store, &camera);

        assert_eq!(store.get(ItemId(0)).unwrap().screen_position, before);
        assert!(matches!(list.commands()[0], DrawCommand::FillRect { color: BACKGROUND_COLOR, .. }));
        let blits: Vec<_> = list.blits().collect();
        assert_eq!(blits.len(), 1);
        assert_eq!(blits[0].1.top_left(), inv.slot_top_left(0, 0, &camera));
    }
}

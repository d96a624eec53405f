//! World state
//!
//! Owns every object in play. Fields are public so systems can borrow
//! disjoint parts (the hand, one inventory, the item arena) at once.

use glam::Vec2;
use serde::Serialize;

use crate::entities::{rainbow_color, Barrier, Orbiter, Player, Station};
use crate::geometry::Camera;
use crate::items::{Inventory, InventoryError, Item, ItemId, ItemStore, SlotMetrics, SlotPos};

/// Side length of a painted barrier
const PAINTED_BARRIER_SIZE: f32 = 20.0;

/// Identifies one inventory in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryKey {
    /// The player's own inventory
    Personal,
    /// Index into `World::inventories`
    World(usize),
}

/// Everything on the map plus the player
#[derive(Debug, Clone)]
pub struct World {
    pub viewport: Vec2,
    pub player: Player,
    pub personal: Inventory,
    /// Inventories owned by stations, in creation order
    pub inventories: Vec<Inventory>,
    pub stations: Vec<Station>,
    pub barriers: Vec<Barrier>,
    pub items: ItemStore,
    pub orbiter: Orbiter,
    /// Frames simulated so far
    pub frame: u64,
}

impl World {
    /// Empty world with the player at the viewport center
    pub fn new(viewport: Vec2, personal_size: (u8, u8), metrics: SlotMetrics) -> Self {
        Self {
            viewport,
            player: Player::new(viewport / 2.0),
            personal: Inventory::personal(personal_size.0, personal_size.1, viewport, metrics),
            inventories: Vec::new(),
            stations: Vec::new(),
            barriers: Vec::new(),
            items: ItemStore::new(),
            orbiter: Orbiter::default(),
            frame: 0,
        }
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.player.position, self.viewport)
    }

    /// Open inventories: world inventories in order, then the personal one
    pub fn open_inventories(&self) -> Vec<InventoryKey> {
        let mut open: Vec<InventoryKey> = self
            .inventories
            .iter()
            .enumerate()
            .filter(|(_, inv)| inv.is_open())
            .map(|(i, _)| InventoryKey::World(i))
            .collect();
        if self.personal.is_open() {
            open.push(InventoryKey::Personal);
        }
        open
    }

    pub fn inventory(&self, key: InventoryKey) -> Option<&Inventory> {
        match key {
            InventoryKey::Personal => Some(&self.personal),
            InventoryKey::World(i) => self.inventories.get(i),
        }
    }

    pub fn inventory_mut(&mut self, key: InventoryKey) -> Option<&mut Inventory> {
        match key {
            InventoryKey::Personal => Some(&mut self.personal),
            InventoryKey::World(i) => self.inventories.get_mut(i),
        }
    }

    /// Borrow an inventory together with the item arena and the player
    pub fn inventory_parts(&mut self, key: InventoryKey) -> Option<(&mut Inventory, &mut ItemStore, &mut Player)> {
        let inventory = match key {
            InventoryKey::Personal => &mut self.personal,
            InventoryKey::World(i) => self.inventories.get_mut(i)?,
        };
        Some((inventory, &mut self.items, &mut self.player))
    }

    /// Add an item lying on the map
    pub fn add_item(&mut self, item: Item) -> ItemId {
        self.items.insert(item)
    }

    /// Add an item straight into an inventory's first empty slot
    ///
    /// When the inventory is full the item stays on the map where it was
    /// created.
    pub fn stash_item(&mut self, key: InventoryKey, item: Item) -> Result<(ItemId, SlotPos), InventoryError> {
        let camera = self.camera();
        let id = self.items.insert(item);
        let (inventory, items, _) = self.inventory_parts(key).ok_or(InventoryError::Full)?;
        let Some(item) = items.get_mut(id) else {
            return Err(InventoryError::ItemNotInGrid(id));
        };

        match inventory.stash(item, &camera) {
            Ok(slot) => Ok((id, slot)),
            Err(e) => {
                log::warn!("Could not stash {}: {}", item.name, e);
                Err(e)
            }
        }
    }

    /// Add a station and give it its own inventory
    pub fn add_station(&mut self, mut station: Station, inventory: Inventory) -> usize {
        station.inventory = self.inventories.len();
        self.inventories.push(inventory);
        self.stations.push(station);
        self.stations.len() - 1
    }

    pub fn toggle_personal_inventory(&mut self) {
        self.personal.toggle();
        log::debug!("Personal inventory open: {}", self.personal.is_open());
    }

    /// Flip the open flag of every station's inventory
    pub fn toggle_station_inventories(&mut self) {
        for station in &self.stations {
            if let Some(inventory) = self.inventories.get_mut(station.inventory) {
                inventory.toggle();
            }
        }
        log::debug!("Toggled {} station inventories", self.stations.len());
    }

    pub fn create_barrier(&mut self, barrier: Barrier) {
        self.barriers.push(barrier);
    }

    /// Drop a square barrier under the pointer, coloured by frame
    pub fn paint_barrier(&mut self, pointer: Vec2) {
        let position = self.camera().screen_to_map(pointer);
        self.create_barrier(Barrier::square(position, PAINTED_BARRIER_SIZE, rainbow_color(self.frame)));
    }

    /// Ids of on-screen items lying on the map, in arena order
    pub fn visible_map_items(&self) -> Vec<ItemId> {
        let camera = self.camera();
        self.items
            .iter()
            .filter(|item| item.is_on_map() && camera.is_on_screen(item.map_position, item.image.size))
            .map(|item| item.id)
            .collect()
    }

    /// Advance one frame
    pub fn update(&mut self) {
        self.player.update();
        self.orbiter.update();
        for station in &mut self.stations {
            station.update();
        }
        self.frame += 1;
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let name_of = |id: ItemId| {
            self.items
                .get(id)
                .map(|item| item.name.clone())
                .unwrap_or_else(|| format!("missing {}", id))
        };

        WorldSnapshot {
            frame: self.frame,
            player_position: self.player.position.into(),
            player_velocity: self.player.velocity.into(),
            hand: self.player.held().map(&name_of),
            personal_inventory: self
                .personal
                .items()
                .map(|(slot, id)| SlotSnapshot { x: slot.x, y: slot.y, item: name_of(id) })
                .collect(),
            items_on_map: self.items.iter().filter(|item| item.is_on_map()).count(),
            barriers: self.barriers.len(),
        }
    }
}

/// Debug view of the player's state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub frame: u64,
    pub player_position: [f32; 2],
    pub player_velocity: [f32; 2],
    pub hand: Option<String>,
    pub personal_inventory: Vec<SlotSnapshot>,
    pub items_on_map: usize,
    pub barriers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSnapshot {
    pub x: u8,
    pub y: u8,
    pub item: String,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::data::default_item_catalog;
    use crate::items::{create_random_item, ImageHandle};

    const VIEWPORT: Vec2 = Vec2::new(800.0, 800.0);

    fn make_world() -> World {
        World::new(VIEWPORT, (5, 2), SlotMetrics::default())
    }

    fn make_item(at: Vec2) -> Item {
        let mut rng = StdRng::seed_from_u64(1);
        create_random_item(&default_item_catalog(), at, &mut rng).unwrap()
    }

    fn furnace(at: Vec2) -> Station {
        let image = ImageHandle::new("station/furnace", Vec2::new(64.0, 64.0), 'F', (200, 90, 40));
        Station::new("Furnace", image, at, 0)
    }

    #[test]
    fn test_player_starts_centered() {
        let world = make_world();
        assert_eq!(world.player.position, Vec2::new(400.0, 400.0));
        assert_eq!(world.camera().position(), Vec2::ZERO);
    }

    #[test]
    fn test_open_inventory_order() {
        let mut world = make_world();
        for x in [100.0, 500.0] {
            let inv = Inventory::at_map(1, 1, Vec2::new(x, 100.0), SlotMetrics::default());
            world.add_station(furnace(Vec2::new(x, 100.0)), inv);
        }
        assert!(world.open_inventories().is_empty());

        world.toggle_personal_inventory();
        world.toggle_station_inventories();
        assert_eq!(
            world.open_inventories(),
            vec![InventoryKey::World(0), InventoryKey::World(1), InventoryKey::Personal]
        );
        assert_eq!(world.stations[1].inventory, 1);
    }

    #[test]
    fn test_stash_item() {
        let mut world = make_world();
        let (id, slot) = world.stash_item(InventoryKey::Personal, make_item(Vec2::ZERO)).unwrap();
        assert_eq!(slot, SlotPos::new(0, 0));
        assert!(world.items.get(id).unwrap().is_in_inventory());
        assert!(world.visible_map_items().is_empty());
    }

    #[test]
    fn test_stash_into_full_inventory() {
        let mut world = make_world();
        world.personal = Inventory::personal(1, 1, VIEWPORT, SlotMetrics::default());
        world.stash_item(InventoryKey::Personal, make_item(Vec2::ZERO)).unwrap();

        let result = world.stash_item(InventoryKey::Personal, make_item(Vec2::new(10.0, 10.0)));
        assert_eq!(result, Err(InventoryError::Full));
        assert_eq!(world.items.len(), 2);
        assert!(world.items.get(ItemId(1)).unwrap().is_on_map());
    }

    #[test]
    fn test_visible_map_items_uses_center() {
        let mut world = make_world();
        let near = world.add_item(make_item(Vec2::new(50.0, 50.0)));
        // Center at (-10, 50) is off screen even though the image overlaps it
        world.add_item(make_item(Vec2::new(-60.0, 0.0)));

        assert_eq!(world.visible_map_items(), vec![near]);
    }

    #[test]
    fn test_paint_barrier() {
        let mut world = make_world();
        world.player.position = Vec2::new(500.0, 400.0);
        world.paint_barrier(Vec2::new(10.0, 20.0));

        assert_eq!(world.barriers.len(), 1);
        assert_eq!(world.barriers[0].position, Vec2::new(110.0, 20.0));
    }

    #[test]
    fn test_update_moves_player_and_counts_frames() {
        let mut world = make_world();
        world.player.velocity = Vec2::new(5.0, 0.0);
        world.update();
        world.update();
        assert_eq!(world.player.position, Vec2::new(410.0, 400.0));
        assert_eq!(world.frame, 2);
    }

    #[test]
    fn test_snapshot_json() {
        let mut world = make_world();
        let (id, _) = world.stash_item(InventoryKey::Personal, make_item(Vec2::ZERO)).unwrap();
        let name = world.items.get(id).unwrap().name.clone();

        let snapshot = world.snapshot();
        assert_eq!(snapshot.personal_inventory.len(), 1);
        assert_eq!(snapshot.personal_inventory[0].item, name);

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"player_position\""));
        assert!(json.contains(&name));
    }
}

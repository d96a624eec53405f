//! Pointer interaction
//!
//! Resolves pointer presses and releases against the world: picking items
//! up from inventories or the map, and putting the held item down into a
//! slot or back on the ground.

use glam::Vec2;

use crate::items::{ItemId, PlaceOutcome};
use crate::world::{InventoryKey, World};

/// What a pointer press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// Lifted out of an inventory slot
    FromInventory { key: InventoryKey, item: ItemId },
    /// Lifted off the map
    FromMap(ItemId),
    /// The hand was already full
    AlreadyHolding,
    Nothing,
}

/// What a pointer release did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Offered to every open inventory under the pointer, in order
    Placed { item: ItemId, placements: Vec<(InventoryKey, PlaceOutcome)> },
    /// Put on the ground at the player's position
    Dropped(ItemId),
    NotHolding,
}

impl ReleaseOutcome {
    /// Whether the released item ended up in a slot
    pub fn slotted(&self) -> bool {
        match self {
            ReleaseOutcome::Placed { placements, .. } => placements.iter().any(|(_, p)| p.is_slotted()),
            _ => false,
        }
    }
}

/// Handle a pointer press at a screen position
pub fn pointer_down(world: &mut World, pointer: Vec2) -> PickOutcome {
    if world.player.is_holding() {
        return PickOutcome::AlreadyHolding;
    }

    let camera = world.camera();
    let under_pointer = world
        .open_inventories()
        .into_iter()
        .find(|&key| world.inventory(key).is_some_and(|inv| inv.contains_point(pointer, &camera)));

    if let Some(key) = under_pointer {
        let Some((inventory, items, player)) = world.inventory_parts(key) else {
            return PickOutcome::Nothing;
        };
        let Some(id) = inventory.item_at(pointer, items, &camera) else {
            return PickOutcome::Nothing;
        };
        let Some(item) = items.get_mut(id) else {
            return PickOutcome::Nothing;
        };

        return match inventory.move_to_hand(item, pointer, player) {
            Ok(()) => PickOutcome::FromInventory { key, item: id },
            Err(e) => {
                log::warn!("Pick up from {:?} failed: {}", key, e);
                PickOutcome::Nothing
            }
        };
    }

    let camera_position = camera.position();
    let hit = world.visible_map_items().into_iter().find(|&id| {
        world
            .items
            .get(id)
            .is_some_and(|item| item.bounding_box_on_map(camera_position).contains(pointer))
    });

    let Some(id) = hit else {
        return PickOutcome::Nothing;
    };
    let Some(item) = world.items.get_mut(id) else {
        return PickOutcome::Nothing;
    };

    item.take_in_hand(pointer);
    world.player.hold(id);
    log::debug!("Picked up {} from the map", item.name);
    PickOutcome::FromMap(id)
}

/// Handle a pointer release at a screen position
pub fn pointer_up(world: &mut World, pointer: Vec2) -> ReleaseOutcome {
    let Some(held) = world.player.held() else {
        return ReleaseOutcome::NotHolding;
    };
    if world.items.get(held).is_none() {
        log::error!("Hand holds unknown item {}", held);
        world.player.clear_hand();
        return ReleaseOutcome::NotHolding;
    }

    let camera = world.camera();
    let targets: Vec<InventoryKey> = world
        .open_inventories()
        .into_iter()
        .filter(|&key| world.inventory(key).is_some_and(|inv| inv.contains_point(pointer, &camera)))
        .collect();

    if targets.is_empty() {
        drop_held(world, held);
        return ReleaseOutcome::Dropped(held);
    }

    let viewport = world.viewport;
    let mut placements = Vec::with_capacity(targets.len());
    for key in targets {
        let Some((inventory, items, player)) = world.inventory_parts(key) else {
            continue;
        };
        if let Some(item) = items.get_mut(held) {
            placements.push((key, inventory.place_item(item, pointer, player, viewport)));
        }
    }

    ReleaseOutcome::Placed { item: held, placements }
}

/// Put the held item on the ground under the player
fn drop_held(world: &mut World, id: ItemId) {
    let position = world.player.position;
    if let Some(item) = world.items.get_mut(id) {
        item.drop_at(position);
        log::debug!("Dropped {} at {}", item.name, position);
    }
    world.player.clear_hand();
}

//! Starting world layout

use glam::Vec2;
use rand::Rng;

use crate::config::Settings;
use crate::data::ItemCatalog;
use crate::entities::{Barrier, Crafting, Station};
use crate::items::{create_random_item, ImageHandle, Inventory};
use super::state::World;

const GREEN: (u8, u8, u8) = (105, 190, 0);
const RED: (u8, u8, u8) = (255, 0, 0);
const BARRIER_SIZE: f32 = 20.0;

/// Map positions of the starting furnaces
pub const FURNACE_POSITIONS: [Vec2; 2] = [Vec2::new(100.0, 100.0), Vec2::new(500.0, 100.0)];

/// First item always lands here, before the scattered ones
pub const FIRST_ITEM_POSITION: Vec2 = Vec2::new(50.0, 50.0);

fn furnace_image() -> ImageHandle {
    ImageHandle::new("station/furnace", Vec2::new(64.0, 64.0), 'F', (200, 90, 40))
}

/// Build the starting world
pub fn build_world(settings: &Settings, catalog: &ItemCatalog, rng: &mut impl Rng) -> World {
    let mut world = World::new(
        settings.viewport(),
        (settings.inventory_width, settings.inventory_height),
        settings.slot_metrics,
    );
    let scatter = &settings.scatter;

    for _ in 0..scatter.green_barriers {
        let position = Vec2::new(
            rng.gen::<f32>() * scatter.barrier_extent,
            rng.gen::<f32>() * scatter.barrier_extent,
        );
        world.create_barrier(Barrier::square(position, BARRIER_SIZE, GREEN));
    }
    for i in 0..scatter.red_barriers {
        let position = Vec2::new(i as f32 * scatter.red_barrier_spacing, 0.0);
        world.create_barrier(Barrier::square(position, BARRIER_SIZE, RED));
    }

    let mut positions = vec![FIRST_ITEM_POSITION];
    for _ in 0..scatter.items {
        positions.push(Vec2::new(
            rng.gen_range(0..=scatter.item_extent) as f32,
            rng.gen_range(0..=scatter.item_extent) as f32,
        ));
    }
    for position in positions {
        match create_random_item(catalog, position, rng) {
            Some(item) => {
                world.add_item(item);
            }
            None => log::warn!("Item catalog is empty, no item placed at {}", position),
        }
    }

    for position in FURNACE_POSITIONS {
        let inventory = Inventory::at_map(1, 1, position, settings.slot_metrics);
        let station = Station::new("Furnace", furnace_image(), position, 0).with_crafting(Crafting::enabled());
        world.add_station(station, inventory);
    }

    log::info!(
        "World ready: {} barriers, {} items, {} stations",
        world.barriers.len(),
        world.items.len(),
        world.stations.len()
    );
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::data::default_item_catalog;

    fn build(seed: u64) -> World {
        let mut rng = StdRng::seed_from_u64(seed);
        build_world(&Settings::default(), &default_item_catalog(), &mut rng)
    }

    #[test]
    fn test_default_layout() {
        let world = build(42);

        assert_eq!(world.barriers.len(), 110);
        assert_eq!(world.items.len(), 11);
        assert_eq!(world.stations.len(), 2);
        assert_eq!(world.inventories.len(), 2);
        assert_eq!(world.personal.dimensions(), (5, 2));
        assert!(world.open_inventories().is_empty());

        let first = world.items.iter().next().unwrap();
        assert_eq!(first.map_position, FIRST_ITEM_POSITION);
        assert!(world.items.iter().all(|item| {
            item.is_on_map()
                && (0.0..=500.0).contains(&item.map_position.x)
                && (0.0..=500.0).contains(&item.map_position.y)
        }));
    }

    #[test]
    fn test_red_barriers_line_the_top() {
        let world = build(1);
        let red: Vec<_> = world.barriers.iter().filter(|b| b.color == RED).collect();
        assert_eq!(red.len(), 10);
        assert_eq!(red[3].position, Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_furnaces_own_inventories() {
        let world = build(3);
        for (i, station) in world.stations.iter().enumerate() {
            assert_eq!(station.inventory, i);
            assert_eq!(station.position, FURNACE_POSITIONS[i]);
            assert_eq!(world.inventories[i].dimensions(), (1, 1));
            assert_eq!(station.height, 100.0);
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = build(9);
        let b = build(9);
        let names = |w: &World| w.items.iter().map(|i| i.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&a), names(&b));
    }
}

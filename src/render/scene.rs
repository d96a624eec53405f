//! Frame composition
//!
//! Draws the world back to front. The held item goes last so it sits on
//! top of any open inventory.

use glam::Vec2;

use crate::world::World;
use super::surface::{Rgb, Surface};

const BACKGROUND: Rgb = (0, 0, 0);
const FPS_COLOR: Rgb = (155, 155, 255);
const FPS_POSITION: Vec2 = Vec2::new(10.0, 10.0);

/// Draw one frame; `pointer` is where the held item follows the cursor
pub fn render_scene(world: &mut World, surface: &mut dyn Surface, pointer: Vec2, fps: f32) {
    let camera = world.camera();
    let camera_position = camera.position();

    surface.clear(BACKGROUND);
    world.player.render(surface, world.viewport);

    for barrier in &world.barriers {
        if camera.is_on_screen(barrier.position, barrier.extent()) {
            barrier.render(surface, camera_position);
        }
    }

    for station in &world.stations {
        if camera.is_on_screen(station.position, station.size()) {
            station.render(surface, camera_position);
        }
    }

    world.orbiter.render(surface, world.viewport / 2.0);

    for item in world.items.iter() {
        if item.is_on_map() && camera.is_on_screen(item.map_position, item.image.size) {
            item.render_on_map(surface, camera_position);
        }
    }

    for inventory in world.inventories.iter().filter(|inv| inv.is_open()) {
        inventory.render(surface, &world.items, &camera);
    }
    if world.personal.is_open() {
        world.personal.render(surface, &world.items, &camera);
    }

    if let Some(item) = world.player.held().and_then(|id| world.items.get_mut(id)) {
        item.render_on_screen(surface, pointer, true);
    }

    surface.text(FPS_POSITION, &format!("FPS: {:.2}", fps), FPS_COLOR);
}

//! Camera and coordinate transforms
//!
//! The camera is always centered on the player, so the top-left corner of
//! the viewport in map space is `player - viewport / 2`.

use glam::Vec2;

/// Map-space position of the viewport's top-left corner
#[inline]
pub fn camera_position(player: Vec2, viewport: Vec2) -> Vec2 {
    player - viewport / 2.0
}

/// Convert a screen position to a map position
#[inline]
pub fn screen_to_map(screen: Vec2, player: Vec2, viewport: Vec2) -> Vec2 {
    screen + player - viewport / 2.0
}

/// Convert a map position to a screen position
#[inline]
pub fn map_to_screen(map: Vec2, player: Vec2, viewport: Vec2) -> Vec2 {
    map - camera_position(player, viewport)
}

/// Snapshot of the view for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Player map position (the view center)
    pub player: Vec2,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(player: Vec2, viewport: Vec2) -> Self {
        Self { player, viewport }
    }

    /// Map position of the viewport's top-left corner
    pub fn position(&self) -> Vec2 {
        camera_position(self.player, self.viewport)
    }

    pub fn screen_to_map(&self, screen: Vec2) -> Vec2 {
        screen_to_map(screen, self.player, self.viewport)
    }

    pub fn map_to_screen(&self, map: Vec2) -> Vec2 {
        map_to_screen(map, self.player, self.viewport)
    }

    /// Check whether an object's center is strictly inside the view
    ///
    /// `size` is the object's image size; pass `Vec2::ZERO` for point objects.
    pub fn is_on_screen(&self, map: Vec2, size: Vec2) -> bool {
        let center = map + size / 2.0;
        let half = self.viewport / 2.0;
        let min = self.player - half;
        let max = self.player + half;

        min.x < center.x && center.x < max.x && min.y < center.y && center.y < max.y
    }
}

//! Screen-space rectangles used for drawing and hit-testing

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_corners(top_left: Vec2, bottom_right: Vec2) -> Self {
        let size = bottom_right - top_left;
        Self::new(top_left.x, top_left.y, size.x, size.y)
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        self.top_left() + self.size() / 2.0
    }

    /// Half-open containment: left/top edges inside, right/bottom edges outside
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    /// Open containment: every edge is outside
    pub fn contains_strict(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }

    /// Grow the rectangle by `amount` on every side
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.w + 2.0 * amount,
            self.h + 2.0 * amount,
        )
    }
}

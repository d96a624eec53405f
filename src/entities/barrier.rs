//! Static map decorations

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::ScreenRect;
use crate::render::{Rgb, Surface};

/// Radius used for circular barriers regardless of `size`
const CIRCLE_RADIUS: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarrierShape {
    Circle,
    Square,
}

/// A background object that never moves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    /// Map position; the center of a circle, the top-left of a square
    pub position: Vec2,
    pub size: f32,
    pub shape: BarrierShape,
    pub color: Rgb,
}

impl Barrier {
    pub fn new(position: Vec2, size: f32, shape: BarrierShape, color: Rgb) -> Self {
        Self { position, size, shape, color }
    }

    pub fn square(position: Vec2, size: f32, color: Rgb) -> Self {
        Self::new(position, size, BarrierShape::Square, color)
    }

    /// Footprint used for the on-screen test
    pub fn extent(&self) -> Vec2 {
        Vec2::splat(self.size)
    }

    pub fn render(&self, surface: &mut dyn Surface, camera_position: Vec2) {
        let pos = (self.position - camera_position).floor();
        match self.shape {
            BarrierShape::Circle => surface.fill_circle(pos, CIRCLE_RADIUS, self.color),
            BarrierShape::Square => {
                surface.fill_rect(ScreenRect::from_pos_size(pos, self.extent()), self.color)
            }
        }
    }
}

/// Colour for a painted barrier, cycling through hues with the frame counter
pub fn rainbow_color(frame: u64) -> Rgb {
    use std::f32::consts::PI;

    let phase = frame as f32 / 100.0;
    let channel = |offset: f32| ((phase + offset).sin() * 255.0).abs() as u8;
    let red = ((phase.sin() * 255.0) % 255.0).abs() as u8;
    (red, channel(2.0 * PI / 3.0), channel(4.0 * PI / 3.0))
}

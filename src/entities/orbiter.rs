//! Decorative body circling the player

use glam::Vec2;

use crate::render::{Rgb, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Orbiter {
    /// Drawn radius of the body
    pub size: f32,
    /// Distance from the orbit center
    pub radius: f32,
    /// Radians advanced per frame
    pub speed: f32,
    pub color: Rgb,
    angle: f32,
}

impl Default for Orbiter {
    fn default() -> Self {
        Self::new(10.0, 50.0, 0.1, (0, 50, 255))
    }
}

impl Orbiter {
    pub fn new(size: f32, radius: f32, speed: f32, color: Rgb) -> Self {
        Self { size, radius, speed, color, angle: 0.0 }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn update(&mut self) {
        self.angle = (self.angle + self.speed) % std::f32::consts::TAU;
    }

    /// Screen position of the body around `center`
    pub fn position(&self, center: Vec2) -> Vec2 {
        center + Vec2::from_angle(self.angle) * self.radius
    }

    pub fn render(&self, surface: &mut dyn Surface, center: Vec2) {
        surface.fill_circle(self.position(center).floor(), self.size, self.color);
    }
}

//! Player entity

use glam::Vec2;

use crate::items::ItemId;
use crate::render::{Rgb, Surface};

/// Movement axis for keyboard steering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The controlling actor
#[derive(Debug, Clone)]
pub struct Player {
    /// Map position of the player's center
    pub position: Vec2,
    pub velocity: Vec2,
    pub max_velocity: f32,
    /// Radius in pixels
    pub radius: f32,
    pub color: Rgb,
    /// Item currently attached to the cursor
    hand: Option<ItemId>,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            max_velocity: 5.0,
            radius: 10.0,
            color: (190, 25, 190),
            hand: None,
        }
    }

    /// Item in hand, if any
    pub fn held(&self) -> Option<ItemId> {
        self.hand
    }

    pub fn is_holding(&self) -> bool {
        self.hand.is_some()
    }

    pub fn hold(&mut self, item: ItemId) {
        if let Some(previous) = self.hand.replace(item) {
            if previous != item {
                log::warn!("Hand already held item {}, replaced by {}", previous, item);
            }
        }
    }

    pub fn clear_hand(&mut self) {
        self.hand = None;
    }

    /// Empty the hand, returning what was in it
    pub fn take_held(&mut self) -> Option<ItemId> {
        self.hand.take()
    }

    /// Integrate velocity for one frame
    pub fn update(&mut self) {
        self.position += self.velocity;
    }

    /// Steer along one axis: `direction` is -1, 0 or 1
    pub fn steer(&mut self, axis: Axis, direction: f32) {
        let speed = direction.clamp(-1.0, 1.0) * self.max_velocity;
        match axis {
            Axis::Horizontal => self.velocity.x = speed,
            Axis::Vertical => self.velocity.y = speed,
        }
    }

    /// Cut the current velocity to a quarter
    pub fn slow_down(&mut self) {
        self.velocity /= 4.0;
    }

    /// The player is always drawn at the viewport center
    pub fn render(&self, surface: &mut dyn Surface, viewport: Vec2) {
        surface.fill_circle(viewport / 2.0, self.radius, self.color);
    }
}

//! World objects that own an inventory
//!
//! Furnaces, chests and the like. The inventory itself lives in the
//! world's inventory list; a station only keeps its index.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::ScreenRect;
use crate::items::ImageHandle;
use crate::render::Surface;

/// Drawn width of every station; height follows the image aspect ratio
pub const STATION_WIDTH: f32 = 100.0;

/// Frames a crafting job takes
pub const CRAFTING_FRAMES: u32 = 100;

/// Crafting capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crafting {
    pub can_craft: bool,
    pub is_crafting: bool,
    /// Frames left on the current job
    pub timer: u32,
}

impl Default for Crafting {
    fn default() -> Self {
        Self {
            can_craft: false,
            is_crafting: false,
            timer: CRAFTING_FRAMES,
        }
    }
}

impl Crafting {
    pub fn enabled() -> Self {
        Self { can_craft: true, ..Self::default() }
    }

    /// Advance an active job by one frame
    pub fn tick(&mut self) {
        if !self.is_crafting {
            return;
        }
        self.timer = self.timer.saturating_sub(1);
        if self.timer == 0 {
            self.is_crafting = false;
            self.timer = CRAFTING_FRAMES;
        }
    }

    /// Try to start a job; no recipes exist yet so nothing is produced
    pub fn craft(&mut self, name: &str) -> bool {
        if !self.can_craft {
            log::debug!("{} cannot craft", name);
            return false;
        }
        log::debug!("{} has no matching recipe", name);
        false
    }
}

/// A map object with an inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub image: ImageHandle,
    /// Top-left corner in map space
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    /// Index into the world's inventory list
    pub inventory: usize,
    pub crafting: Option<Crafting>,
}

impl Station {
    pub fn new(name: impl Into<String>, image: ImageHandle, position: Vec2, inventory: usize) -> Self {
        let height = if image.width() > 0.0 {
            image.height() * STATION_WIDTH / image.width()
        } else {
            STATION_WIDTH
        };
        Self {
            name: name.into(),
            image,
            position,
            width: STATION_WIDTH,
            height,
            inventory,
            crafting: None,
        }
    }

    pub fn with_crafting(mut self, crafting: Crafting) -> Self {
        self.crafting = Some(crafting);
        self
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn update(&mut self) {
        if let Some(crafting) = self.crafting.as_mut() {
            crafting.tick();
        }
    }

    pub fn render(&self, surface: &mut dyn Surface, camera_position: Vec2) {
        let rect = ScreenRect::from_pos_size((self.position - camera_position).floor(), self.size().floor());
        surface.blit(&self.image, rect);
    }
}

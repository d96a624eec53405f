//! Geometry module
//!
//! Map/screen coordinate transforms and screen-space rectangles.

pub mod camera;
pub mod rect;

pub use camera::{Camera, screen_to_map, map_to_screen, camera_position};
pub use rect::ScreenRect;

//! Rendering abstraction layer
//!
//! Game code draws into a `Surface`; frontends decide how the recorded
//! commands reach the screen.

pub mod surface;
pub mod scene;

pub use surface::{Rgb, Surface, DrawCommand, DrawList};
pub use scene::render_scene;

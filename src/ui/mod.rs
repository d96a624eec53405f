//! User Interface module
//!
//! Terminal frontend using ratatui with crossterm mouse capture.

pub mod app;
pub mod input;
pub mod widgets;

pub use app::App;
pub use input::{InputAction, PointerAction, key_action, pointer_action, cell_to_pixel};

//! UI widgets

pub mod scene;

pub use scene::SceneWidget;

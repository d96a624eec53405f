//! Pointer-driven item handling

pub mod controller;

pub use controller::{pointer_down, pointer_up, PickOutcome, ReleaseOutcome};

//! Entities living on the map

pub mod player;
pub mod barrier;
pub mod station;
pub mod orbiter;

pub use player::{Player, Axis};
pub use barrier::{Barrier, BarrierShape, rainbow_color};
pub use station::{Station, Crafting, STATION_WIDTH, CRAFTING_FRAMES};
pub use orbiter::Orbiter;

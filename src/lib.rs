//! Bumbles: a headless artificial-life world.
//!
//! [`model::world::World`] owns every collection and runs the tick
//! pipeline; the engine logic lives in `bumbles_core`.

pub mod model;

pub use bumbles_core::config::{AppConfig, WorldConfigPatch};
pub use model::world::{World, WorldError};

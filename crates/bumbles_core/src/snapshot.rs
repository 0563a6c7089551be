use bumbles_data::{Bumble, Fire, Food, Gender, SimulationStats, Water};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Frozen, read-only view of one bumble taken at the start of a tick.
///
/// Cross-agent reads during the behavior pass go through these views so no
/// bumble observes another's same-tick changes.
#[derive(Clone, Debug, PartialEq)]
pub struct InternalBumbleSnapshot {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    pub gender: Gender,
    pub is_alive: bool,
    pub is_vampire: bool,
    pub energy: f64,
}

impl From<&Bumble> for InternalBumbleSnapshot {
    fn from(b: &Bumble) -> Self {
        Self {
            id: b.id(),
            x: b.physics.x,
            y: b.physics.y,
            gender: b.identity.gender,
            is_alive: b.is_alive,
            is_vampire: b.is_vampire(),
            energy: b.vitals.energy,
        }
    }
}

/// What a renderer needs to draw one frame.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub generation: u32,
    pub is_night: bool,
    pub running: bool,
    pub width: f64,
    pub height: f64,
    pub bumbles: Vec<Bumble>,
    pub food: Vec<Food>,
    pub water: Vec<Water>,
    pub fires: Vec<Fire>,
    pub stats: SimulationStats,
}

use super::genotype::Genetics;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// The behavior a bumble selected on its most recent tick.
///
/// Variants are listed in priority order; only the first applicable one acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BehaviorState {
    Flee,
    Feed,
    SeekWater,
    SeekFood,
    #[default]
    Wander,
}

/// Unique identification of a bumble.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub generation: u32,
    pub parent_ids: Option<(Uuid, Uuid)>,
}

/// Position, motion and wandering state.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Physics {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub wander_x: f64,
    pub wander_y: f64,
    /// Milliseconds since the wander destination was last chosen.
    pub wander_time: f64,
}

/// Energy, water balance and age. Times are in milliseconds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vitals {
    pub energy: f64,
    pub max_energy: f64,
    pub thirst: f64,
    pub max_thirst: f64,
    pub age: f64,
    pub max_age: f64,
    pub reproduction_cooldown: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Health {
    pub health: f64,
    pub max_health: f64,
    pub disease_resistance: f64,
    pub is_diseased: bool,
}

/// Behavioral memory: stress, timers and weak references to other objects.
///
/// `mate_id`, `target_food` and `target_water` are back-references resolved
/// by lookup each tick; the referenced object may already be gone.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Intel {
    pub state: BehaviorState,
    pub stress: f64,
    pub learning_experience: f64,
    pub flee_time: f64,
    pub vampire_feed_cooldown: f64,
    pub mate_id: Option<Uuid>,
    pub target_food: Option<Uuid>,
    pub target_water: Option<Uuid>,
}

/// A complete simulated creature.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bumble {
    #[serde(flatten)]
    pub identity: Identity,
    pub genetics: Genetics,
    pub physics: Physics,
    pub vitals: Vitals,
    pub health: Health,
    pub intel: Intel,
    pub is_alive: bool,
}

impl Bumble {
    #[inline]
    pub fn id(&self) -> Uuid {
        self.identity.id
    }

    #[inline]
    pub fn is_male(&self) -> bool {
        self.identity.gender == Gender::Male
    }

    #[inline]
    pub fn is_vampire(&self) -> bool {
        self.genetics.is_vampire
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.physics.x - x;
        let dy = self.physics.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

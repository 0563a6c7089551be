//! Plain data types shared by the Bumbles engine and its drivers.

pub mod data;

pub use data::entity::{
    BehaviorState, Bumble, Gender, Health, Identity, Intel, Physics, Vitals,
};
pub use data::environment::{
    DeathCause, DeathCounts, Fire, Food, FoodKind, LiveEvent, SimulationStats, Water,
};
pub use data::genotype::{Color, Genetics};

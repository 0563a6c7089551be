//! # Bumbles Core
//!
//! The simulation engine for Bumbles, a 2D artificial-life world of
//! creatures that forage, drink, mate, sicken, burn and die.
//!
//! This crate holds the per-tick logic; the world orchestrator that owns
//! the collections lives in the root package. It contains:
//! - Genetic inheritance with layered mutation and bounded traits
//! - Agent construction, aging, metabolism, disease and death evaluation
//! - Behavior selection as an explicit priority chain
//! - Female-choice mating and litter production
//! - Food regrowth, berry drops, water refill and fire spread
//! - Spatial indexing, metrics and structured logging
//!
//! Every stochastic operation takes an explicit `Rng`, so a seeded
//! `ChaCha8Rng` makes a run reproducible.
//!
//! ## Example
//!
//! ```
//! use bumbles_core::genetics::GeneticsLogic;
//! use bumbles_data::{Gender, Genetics};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let genetics = Genetics::generate_initial_with_rng(Gender::Female, 0.0, &mut rng);
//! assert_eq!(genetics.antenna_size, 0.0);
//! assert!(genetics.is_within_ranges(Gender::Female));
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Day/night clock and climate
pub mod environment;
/// Trait ranges, initial draws and inheritance
pub mod genetics;
/// Agent construction, aging and death
pub mod lifecycle;
/// Performance metrics collection and logging
pub mod metrics;
/// Unique-while-alive name pools
pub mod naming;
/// Food, water and fire factories
pub mod resources;
/// Frozen views used for cross-agent reads
pub mod snapshot;
/// Spatial hashing for radius queries
pub mod spatial_hash;
/// Behavior, mating, ecology and statistics systems
pub mod systems;

pub use config::{AppConfig, WorldConfigPatch};
pub use genetics::GeneticsLogic;
pub use metrics::{init_logging, Metrics};
pub use naming::NameRegistry;

//! Per-tick systems run by the world orchestrator.

/// Priority-chain behavior selection and steering
pub mod behavior;
/// Fire, food and water dynamics
pub mod environment;
/// Mate choice and reproduction
pub mod mating;
pub mod stats;

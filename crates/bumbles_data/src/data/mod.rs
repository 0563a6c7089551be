//! Core data structures for the Bumbles simulation.

pub mod entity;
pub mod environment;
pub mod genotype;

//! Simulation engine for STARFALL.
//!
//! Owns the projectile pool, the collision targets, the enemy world and the
//! scoring state; advances them once per host tick and produces
//! `SimSnapshot`s. Headless and deterministic for a given seed.

pub mod engine;
pub mod pool;
pub mod projector;
pub mod scoring;
pub mod systems;
pub mod targets;
pub mod weapon;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use starfall_core as core;

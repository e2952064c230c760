//! Simulation engine for SKIRMISH.
//!
//! Owns the entity table (backed by hecs), the messenger and the seeded RNG,
//! runs every entity's behaviour once per tick, and produces `SimSnapshot`s
//! for the host.

pub mod context;
pub mod engine;
pub mod entity_manager;
pub mod messenger;
pub mod scenario;
pub mod sensing;
pub mod systems;
pub mod world_setup;

pub use context::SimContext;
pub use engine::{SimConfig, SimulationEngine};
pub use entity_manager::{EntityFilter, EntityManager, EntityView};
pub use scenario::{Scenario, ScenarioError};
pub use skirmish_core as core;

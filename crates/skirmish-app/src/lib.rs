//! SKIRMISH command-line runner.
//!
//! Loads a scenario, runs the battle headless (or paced to wall-clock time)
//! and reports the outcome.

pub mod game_loop;
pub mod logging;

pub use skirmish_core as core;

//! Core types and definitions for the SKIRMISH tank simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity components, templates, messages, commands, snapshots, constants
//! and the hierarchical transform. It has no dependency on the ECS or any
//! runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use error::SkirmishError;
pub use types::{Transform, Uid};

#[cfg(test)]
mod tests;

//! Tank AI for SKIRMISH.
//!
//! Implements the tank behaviour state machine as pure decision functions,
//! plus the targeting math (view cone, turret stepping) it relies on.

pub mod fsm;
pub mod targeting;

pub use skirmish_core as core;

//! Per-entity behaviours and the per-tick systems around them.
//!
//! Behaviours take `&mut SimContext` and the entity's UID, and report
//! whether the entity survives the sweep. They do not own state; all state
//! lives in components.

pub mod ammo;
pub mod ammo_drop;
pub mod scenery;
pub mod shell;
pub mod snapshot;
pub mod tank;

//! Arena geometry for SKIRMISH.
//!
//! Static rectangular occluders (buildings) and the line-of-sight test
//! tanks use before they commit to an aim.

pub use skirmish_core as core;

pub mod los;
pub mod occluder;

// Re-export key types for convenience.
pub use los::{has_line_of_sight, segment_clear_of};
pub use occluder::{Arena, Occluder};

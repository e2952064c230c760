//! Host commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::Uid;

/// All possible host actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Send `Start` to every tank and arm the ammo drop schedule.
    StartAll,
    /// Send `Stop` to every tank.
    StopAll,
    /// Send `Start` to one tank.
    Start { uid: Uid },
    /// Send `Stop` to one tank.
    Stop { uid: Uid },
    /// Pick a tank up and put it down elsewhere on the ground plane, then
    /// send it `Start`.
    Relocate { uid: Uid, x: f32, z: f32 },
    /// Drop an ammo crate above the given point.
    SpawnAmmo { x: f32, z: f32 },
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f32 },
}

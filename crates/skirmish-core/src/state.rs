//! Simulation snapshot: the visible state handed to the host after each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::TankState;
use crate::events::SimEvent;
use crate::types::{SimTime, Uid};

/// Complete state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub tanks: Vec<TankView>,
    /// Shells currently in flight.
    pub shells: usize,
    pub ammo_crates: Vec<AmmoView>,
    pub events: Vec<SimEvent>,
}

impl SimSnapshot {
    pub fn tank(&self, uid: Uid) -> Option<&TankView> {
        self.tanks.iter().find(|t| t.uid == uid)
    }

    /// Tanks of `team` that are still fighting.
    pub fn survivors(&self, team: u32) -> usize {
        self.tanks
            .iter()
            .filter(|t| t.team == team && t.state != TankState::Dead)
            .count()
    }
}

/// Per-tank status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankView {
    pub uid: Uid,
    pub name: String,
    pub template: String,
    pub team: u32,
    pub hp: i32,
    pub state: TankState,
    pub ammunition: u32,
    pub shots_fired: u32,
    pub position: Vec3,
}

/// A crate on (or falling toward) the ground.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoView {
    pub uid: Uid,
    pub position: Vec3,
}

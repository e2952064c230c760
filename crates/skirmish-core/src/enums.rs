//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tank behaviour state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankState {
    /// Parked, waiting for a `Start` message.
    #[default]
    Inactive,
    /// Driving the patrol route, turret sweeping for enemies.
    Patrol,
    /// Stationary, turret tracking an enemy until the aim timer fires.
    Aim,
    /// Driving to a random point after firing.
    Evade,
    /// Out of ammunition, looking for a crate.
    Empty,
    /// Driving to a point near a friendly tank that called for help.
    Guard,
    /// Destroyed. Terminal.
    Dead,
}

impl TankState {
    pub fn is_dead(self) -> bool {
        self == TankState::Dead
    }

    /// Label shown on the tank HUD line.
    pub fn label(self) -> &'static str {
        match self {
            TankState::Inactive => "Inactive",
            TankState::Patrol => "Patrol",
            TankState::Aim => "Aim",
            TankState::Evade => "Evade",
            TankState::Empty => "Empty",
            TankState::Guard => "Guard",
            TankState::Dead => "Dead",
        }
    }
}

impl fmt::Display for TankState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of message exchanged between entities. Messages carry no payload
/// beyond the kind and the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    Stop,
    Start,
    Hit,
    Evade,
    Help,
    Collected,
}

/// Template type, used by enumeration filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    Tank,
    Shell,
    Ammo,
    Scenery,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateKind::Tank => "Tank",
            TemplateKind::Shell => "Shell",
            TemplateKind::Ammo => "Ammo",
            TemplateKind::Scenery => "Scenery",
        };
        f.write_str(name)
    }
}

/// Result of an entity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Alive,
    /// Destroy the entity once the current sweep completes.
    Destroy,
}

impl Liveness {
    pub fn is_alive(self) -> bool {
        self == Liveness::Alive
    }
}

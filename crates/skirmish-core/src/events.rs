//! Messages exchanged between entities, and events emitted by the simulation
//! for logging and UI feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Uid;

/// A message in an entity mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    /// Sender, or `None` for messages from outside the simulation.
    pub from: Option<Uid>,
}

impl Message {
    pub fn new(kind: MessageKind, from: Option<Uid>) -> Self {
        Self { kind, from }
    }

    /// Message with no sender (commands from the host).
    pub fn anonymous(kind: MessageKind) -> Self {
        Self { kind, from: None }
    }
}

/// Notable things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A tank changed behaviour state.
    TankStateChanged {
        uid: Uid,
        from: TankState,
        to: TankState,
    },
    /// A tank fired a shell.
    ShellFired { tank: Uid, shell: Uid },
    /// A tank took damage.
    TankHit { tank: Uid, damage: i32, hp: i32 },
    /// A tank ran out of hit points.
    TankDestroyed { uid: Uid },
    /// A tank picked up an ammo crate.
    AmmoCollected { tank: Uid, crate_uid: Uid },
    /// A crate was dropped into the arena.
    AmmoDropped { uid: Uid, position: Vec3 },
}

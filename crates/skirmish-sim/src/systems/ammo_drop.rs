//! Ammo drop system: drops a crate into the arena at random intervals once
//! the battle has started.

use glam::Vec3;
use log::{info, warn};
use rand::Rng;

use skirmish_core::constants::*;
use skirmish_core::events::SimEvent;
use skirmish_core::Uid;

use crate::context::SimContext;

/// Countdown to the next crate drop.
#[derive(Debug, Clone, Default)]
pub struct DropSchedule {
    /// Seconds until the next drop; `None` until armed.
    remaining_secs: Option<f32>,
}

impl DropSchedule {
    /// Start counting down to the first drop. Does nothing if already armed.
    pub fn arm(&mut self, rng: &mut impl Rng) {
        if self.remaining_secs.is_none() {
            self.remaining_secs = Some(next_delay(rng));
        }
    }

    pub fn disarm(&mut self) {
        self.remaining_secs = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_secs.is_some()
    }

    /// Seconds left before the next crate, if armed.
    pub fn remaining_secs(&self) -> Option<f32> {
        self.remaining_secs
    }
}

fn next_delay(rng: &mut impl Rng) -> f32 {
    rng.gen_range(AMMO_DROP_MIN_SECS..=AMMO_DROP_MAX_SECS)
}

/// Count down and drop a crate when due, then re-arm.
pub fn run(ctx: &mut SimContext, schedule: &mut DropSchedule, dt: f32) {
    let Some(remaining) = schedule.remaining_secs.as_mut() else {
        return;
    };
    *remaining -= dt;
    if *remaining > 0.0 {
        return;
    }

    let x = ctx.rng.gen_range(-AMMO_DROP_EXTENT..=AMMO_DROP_EXTENT);
    let z = ctx.rng.gen_range(-AMMO_DROP_EXTENT..=AMMO_DROP_EXTENT);
    drop_crate(ctx, x, z);
    schedule.remaining_secs = Some(next_delay(&mut ctx.rng));
}

/// Spawn a crate at drop height above (x, z).
pub fn drop_crate(ctx: &mut SimContext, x: f32, z: f32) -> Option<Uid> {
    let position = Vec3::new(x, AMMO_DROP_HEIGHT, z);
    match ctx
        .entities
        .create_ammo(AMMO_TEMPLATE, position, AMMO_DROP_SCALE)
    {
        Ok(uid) => {
            info!("ammo crate {uid} dropped at ({x:.1}, {z:.1})");
            ctx.events.push(SimEvent::AmmoDropped { uid, position });
            Some(uid)
        }
        Err(err) => {
            warn!("could not drop ammo crate: {err}");
            None
        }
    }
}

//! Ammo crate system: fall to the ground, vanish once collected.

use skirmish_core::constants::AMMO_FALL_PER_TICK;
use skirmish_core::enums::{Liveness, MessageKind};
use skirmish_core::Uid;

use crate::context::SimContext;

pub fn update(ctx: &mut SimContext, uid: Uid, _dt: f32) -> Liveness {
    let mut collected = false;
    while let Some(message) = ctx.messenger.fetch(uid) {
        collected |= message.kind == MessageKind::Collected;
    }
    if collected {
        return Liveness::Destroy;
    }

    // Falls a fixed distance per tick regardless of dt.
    if let Some(transform) = ctx.entities.transform_mut(uid) {
        let mut position = transform.position();
        if position.y > 0.0 {
            position.y = (position.y - AMMO_FALL_PER_TICK).max(0.0);
            transform.set_position(position);
        }
    }
    Liveness::Alive
}

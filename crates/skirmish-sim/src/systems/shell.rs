//! Shell system: flight, lifetime and hit testing.

use log::trace;

use skirmish_core::constants::{SHELL_HIT_RADIUS, SHELL_LIFETIME_SECS};
use skirmish_core::enums::Liveness;
use skirmish_core::Uid;

use crate::context::SimContext;

/// Advance one shell. The shell is destroyed once its lifetime runs out or
/// after it hits the first enemy tank in range (creation order breaks ties).
pub fn update(ctx: &mut SimContext, uid: Uid, dt: f32) -> Liveness {
    // Shells have no use for mail.
    while ctx.messenger.fetch(uid).is_some() {}

    let Some((shell, transform)) = ctx.entities.shell_mut(uid) else {
        return Liveness::Destroy;
    };
    shell.elapsed_secs += dt;
    if shell.elapsed_secs > SHELL_LIFETIME_SECS {
        trace!("shell {uid} expired");
        return Liveness::Destroy;
    }
    transform.move_local_z(shell.speed * dt);
    let (team, damage, position) = (shell.team, shell.damage, transform.position());

    let target = ctx
        .entities
        .tanks()
        .find(|view| {
            view.tank().is_some_and(|t| t.team != team && !t.is_dead())
                && view
                    .position()
                    .is_some_and(|p| p.distance(position) < SHELL_HIT_RADIUS)
        })
        .map(|view| view.uid());

    match target {
        Some(tank) => {
            ctx.hit_tank(tank, damage);
            Liveness::Destroy
        }
        None => Liveness::Alive,
    }
}

//! Tank system: drains the mailbox, senses the surroundings, runs the tank
//! FSM from skirmish-tank-ai and applies the resulting decision.
//!
//! The tank's own components are cloned out of the table for the duration of
//! the update and written back at the end, so sensing can read the rest of
//! the table and firing can spawn shells while the tank is being changed.

use glam::Vec3;
use log::{debug, info, warn};
use rand::Rng;

use skirmish_core::components::{Tank, TankStats};
use skirmish_core::constants::*;
use skirmish_core::enums::{Liveness, MessageKind, TankState};
use skirmish_core::events::{Message, SimEvent};
use skirmish_core::types::planar_distance;
use skirmish_core::{Transform, Uid};

use skirmish_tank_ai::fsm::{
    evaluate, react, AmmoContact, Steering, TankAction, TankContext, Throttle, TurretOrder,
};
use skirmish_tank_ai::targeting::{align_step, turn_step, yaw_towards};

use crate::context::SimContext;
use crate::sensing;

/// Update one tank. Tanks are never destroyed, dead ones stay as wrecks.
pub fn update(ctx: &mut SimContext, uid: Uid, dt: f32) -> Liveness {
    let Some(stats) = ctx.entities.get(uid).and_then(|view| view.template().tank) else {
        return Liveness::Alive;
    };
    let Some((mut tank, mut transform)) = ctx
        .entities
        .tank_mut(uid)
        .map(|(tank, transform)| (tank.clone(), transform.clone()))
    else {
        return Liveness::Alive;
    };

    handle_messages(ctx, uid, &mut tank, &transform);

    let position = transform.position();

    // Sensing
    let scanning = matches!(tank.state, TankState::Patrol | TankState::Aim);
    let (enemy_in_view, on_target) = if scanning {
        let facing = transform.forward(TANK_TURRET_PART);
        tank.nearest_enemy = sensing::nearest_enemy(&ctx.entities, position, tank.team);
        match tank.nearest_enemy {
            Some(enemy) => {
                let sees = |half_angle| {
                    sensing::can_see(
                        &ctx.entities,
                        &ctx.arena,
                        position,
                        facing,
                        enemy.uid,
                        half_angle,
                    )
                };
                (sees(VIEW_HALF_ANGLE), sees(AIM_ALIGNED_ANGLE))
            }
            None => (false, false),
        }
    } else {
        (false, false)
    };

    let ammo = if tank.state == TankState::Empty {
        tank.nearest_ammo = sensing::nearest_ammo(&ctx.entities, position);
        tank.nearest_ammo
            .and_then(|sighting| ctx.entities.get(sighting.uid)?.position())
    } else {
        None
    };

    let context = TankContext {
        state: tank.state,
        hp: tank.hp,
        ammunition: tank.ammunition,
        guarding: tank.guarding,
        aim_elapsed_secs: tank.aim_elapsed_secs,
        aim_locked: tank.aim_locked,
        enemy_in_view,
        on_target,
        evade_distance: tank.evade_target.map(|target| planar_distance(position, target)),
        guard_distance: tank.guard_target.map(|target| planar_distance(position, target)),
        nearest_ammo: ammo.map(|crate_position| AmmoContact {
            distance: position.distance(crate_position),
            grounded: crate_position.y < AMMO_GROUNDED_HEIGHT,
        }),
        broken: tank.broken,
    };

    let decision = evaluate(&context);
    if decision.state_changed {
        change_state(ctx, uid, &mut tank, decision.new_state);
    }
    tank.aim_locked = decision.aim_locked;

    // Steering
    match decision.steering {
        Steering::Hold => {}
        Steering::Waypoint => {
            if tank
                .waypoint()
                .is_some_and(|waypoint| planar_distance(position, waypoint) < ARRIVAL_RADIUS)
            {
                tank.advance_waypoint();
            }
            if let Some(waypoint) = tank.waypoint() {
                transform.face_target(waypoint);
            }
        }
        Steering::EvadeTarget => {
            if let Some(target) = tank.evade_target {
                transform.face_target(target);
            }
        }
        Steering::GuardTarget => {
            if let Some(target) = tank.guard_target {
                transform.face_target(target);
            }
        }
        Steering::Ammo => {
            if let Some(crate_position) = ammo {
                transform.face_target(crate_position);
            }
        }
    }

    // Turret
    let turret_step = stats.turret_turn_speed * dt;
    match decision.turret {
        TurretOrder::Hold => {}
        TurretOrder::Sweep => transform.rotate_part_y(TANK_TURRET_PART, turret_step),
        TurretOrder::Track => {
            let target = tank
                .nearest_enemy
                .and_then(|enemy| ctx.entities.get(enemy.uid)?.position());
            if let Some(target) = target {
                let desired = yaw_towards(position, target);
                let current = transform.world_yaw(TANK_TURRET_PART);
                transform.rotate_part_y(TANK_TURRET_PART, turn_step(current, desired, turret_step));
            }
        }
        TurretOrder::Align => {
            let step = align_step(
                transform.relative_yaw(TANK_TURRET_PART),
                TURRET_ALIGN_TOLERANCE,
                TURRET_ALIGN_STEP,
            );
            transform.rotate_part_y(TANK_TURRET_PART, step);
        }
    }

    // One-off actions
    let mut fired = false;
    match decision.action {
        Some(TankAction::Fire { request_evade }) => {
            fire(ctx, uid, &mut tank, &transform, &stats);
            fired = true;
            if request_evade {
                ctx.send(uid, Message::new(MessageKind::Evade, Some(uid)));
            }
        }
        Some(TankAction::CollectAmmo) => collect_ammo(ctx, uid, &mut tank),
        Some(TankAction::StandDown) => {
            tank.guarding = false;
            tank.guard_target = None;
        }
        Some(TankAction::Wreck) => wreck(&mut ctx.rng, &mut tank, &mut transform),
        None => {}
    }

    tank.speed = match decision.throttle {
        Throttle::Full => stats.max_speed,
        Throttle::Stop => 0.0,
    };
    transform.move_local_z(tank.speed * dt);

    if tank.state == TankState::Aim && !fired {
        tank.aim_elapsed_secs += dt;
    }

    if let Some((stored, stored_transform)) = ctx.entities.tank_mut(uid) {
        *stored = tank;
        *stored_transform = transform;
    }
    Liveness::Alive
}

/// Apply every queued message in arrival order. Dead tanks ignore mail.
fn handle_messages(ctx: &mut SimContext, uid: Uid, tank: &mut Tank, transform: &Transform) {
    while let Some(message) = ctx.messenger.fetch(uid) {
        if tank.is_dead() {
            continue;
        }
        if message.kind == MessageKind::Hit {
            receive_hit(ctx, uid, tank, message.from);
            continue;
        }
        let Some(next) = react(tank.state, message.kind) else {
            continue;
        };

        match message.kind {
            MessageKind::Evade => {
                tank.evade_target = Some(random_offset(
                    &mut ctx.rng,
                    transform.position(),
                    EVADE_OFFSET,
                ));
            }
            MessageKind::Help => {
                let requester = message
                    .from
                    .and_then(|from| ctx.entities.get(from)?.position());
                tank.guard_target =
                    requester.map(|around| random_offset(&mut ctx.rng, around, GUARD_OFFSET));
                tank.guarding = tank.guard_target.is_some();
            }
            MessageKind::Stop => {
                tank.guarding = false;
                tank.guard_target = None;
            }
            _ => {}
        }
        change_state(ctx, uid, tank, next);
    }
}

/// A `Hit` message: damage comes from the sender, a shell or a tank.
fn receive_hit(ctx: &mut SimContext, uid: Uid, tank: &mut Tank, from: Option<Uid>) {
    let damage = from.and_then(|from| {
        let sender = ctx.entities.get(from)?;
        sender
            .shell()
            .map(|shell| shell.damage)
            .or_else(|| sender.template().tank.map(|stats| stats.shell_damage))
    });
    let Some(damage) = damage else {
        debug!("tank {uid} ignoring hit from unknown sender {from:?}");
        return;
    };

    tank.hit(damage);
    debug!("tank {uid} hit for {damage}, {} hp left", tank.hp);
    ctx.events.push(SimEvent::TankHit {
        tank: uid,
        damage,
        hp: tank.hp,
    });
    ctx.call_for_help(uid, tank.team);
}

fn change_state(ctx: &mut SimContext, uid: Uid, tank: &mut Tank, next: TankState) {
    let previous = tank.state;
    if previous == next {
        return;
    }
    if next == TankState::Aim {
        tank.reset_aim();
    }
    if previous == TankState::Evade {
        tank.evade_target = None;
    }
    // Running dry or being told to evade ends any help response.
    if matches!(next, TankState::Empty | TankState::Evade) {
        tank.guarding = false;
        tank.guard_target = None;
    }
    tank.state = next;

    debug!("tank {uid}: {previous} -> {next}");
    ctx.events.push(SimEvent::TankStateChanged {
        uid,
        from: previous,
        to: next,
    });
    if next == TankState::Dead {
        info!("tank {uid} destroyed after {} shots", tank.shots_fired);
        ctx.events.push(SimEvent::TankDestroyed { uid });
    }
}

/// Spawn a shell along the turret. A failed spawn costs no ammunition.
fn fire(ctx: &mut SimContext, uid: Uid, tank: &mut Tank, transform: &Transform, stats: &TankStats) {
    tank.reset_aim();
    let Some((muzzle, rotation, _)) = transform.decompose(TANK_TURRET_PART) else {
        return;
    };
    match ctx
        .entities
        .create_shell(SHELL_TEMPLATE, muzzle, rotation, tank.team, stats.shell_damage)
    {
        Ok(shell) => {
            tank.ammunition = tank.ammunition.saturating_sub(1);
            tank.shots_fired += 1;
            debug!("tank {uid} fired shell {shell}, {} rounds left", tank.ammunition);
            ctx.events.push(SimEvent::ShellFired { tank: uid, shell });
        }
        Err(err) => warn!("tank {uid} could not fire: {err}"),
    }
}

fn collect_ammo(ctx: &mut SimContext, uid: Uid, tank: &mut Tank) {
    let Some(sighting) = tank.nearest_ammo else {
        return;
    };
    tank.ammunition += AMMO_CRATE_ROUNDS;
    ctx.send(sighting.uid, Message::new(MessageKind::Collected, Some(uid)));
    info!("tank {uid} collected crate {}", sighting.uid);
    ctx.events.push(SimEvent::AmmoCollected {
        tank: uid,
        crate_uid: sighting.uid,
    });
}

/// One-off death tumble: random rotation of hull and turret, then sink.
fn wreck(rng: &mut impl Rng, tank: &mut Tank, transform: &mut Transform) {
    transform.rotate_part_local(0, random_tumble(rng));
    transform.rotate_part_local(TANK_TURRET_PART, random_tumble(rng));
    transform.translate(Vec3::NEG_Y * DEATH_DROP);
    tank.broken = true;
}

fn random_tumble(rng: &mut impl Rng) -> Vec3 {
    let mut angle = || to_radians(rng.gen_range(DEATH_TUMBLE_MIN_DEG..=DEATH_TUMBLE_MAX_DEG));
    Vec3::new(angle(), angle(), angle())
}

/// Random point within `extent` of `around` on X and Z.
fn random_offset(rng: &mut impl Rng, around: Vec3, extent: f32) -> Vec3 {
    around
        + Vec3::new(
            rng.gen_range(-extent..=extent),
            0.0,
            rng.gen_range(-extent..=extent),
        )
}

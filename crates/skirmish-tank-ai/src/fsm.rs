//! Tank behaviour finite state machine.
//!
//! Pure functions that compute state transitions, movement orders and
//! one-off actions for a tank from what it currently senses. No ECS
//! dependency: the simulation gathers a `TankContext`, calls `evaluate`,
//! and applies the returned `TankDecision`.

use skirmish_core::constants::{AIM_DURATION_SECS, ARRIVAL_RADIUS};
use skirmish_core::enums::{MessageKind, TankState};

/// What a tank knows about the nearest ammo crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmmoContact {
    pub distance: f32,
    /// The crate has landed and can be driven to.
    pub grounded: bool,
}

/// Input to the tank FSM for a single entity.
#[derive(Debug, Clone, PartialEq)]
pub struct TankContext {
    pub state: TankState,
    pub hp: i32,
    pub ammunition: u32,
    /// Answering a help call.
    pub guarding: bool,
    /// Seconds aimed so far (before this tick).
    pub aim_elapsed_secs: f32,
    pub aim_locked: bool,
    /// An enemy is inside the view cone with clear line of sight.
    pub enemy_in_view: bool,
    /// The turret is within the fine aim angle of that enemy.
    pub on_target: bool,
    pub evade_distance: Option<f32>,
    pub guard_distance: Option<f32>,
    pub nearest_ammo: Option<AmmoContact>,
    /// The death tumble was already applied.
    pub broken: bool,
}

/// Drive speed for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throttle {
    Stop,
    /// Template maximum speed.
    Full,
}

/// Point the body should face before moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    Hold,
    Waypoint,
    EvadeTarget,
    GuardTarget,
    Ammo,
}

/// Turret behaviour for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurretOrder {
    Hold,
    /// Slow scan while patrolling.
    Sweep,
    /// Turn toward the nearest enemy.
    Track,
    /// Turn back in line with the body.
    Align,
}

/// One-off effect requested by the FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankAction {
    /// Spawn a shell along the turret. With `request_evade` the tank also
    /// posts itself an `Evade` message.
    Fire { request_evade: bool },
    /// Take the nearest crate's rounds and tell it it was collected.
    CollectAmmo,
    /// Reached the guard point; drop the guard duty.
    StandDown,
    /// Apply the one-off death tumble.
    Wreck,
}

/// Output from the tank FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct TankDecision {
    pub new_state: TankState,
    pub state_changed: bool,
    pub throttle: Throttle,
    pub steering: Steering,
    pub turret: TurretOrder,
    pub action: Option<TankAction>,
    pub aim_locked: bool,
}

impl TankDecision {
    fn hold(ctx: &TankContext) -> Self {
        Self {
            new_state: ctx.state,
            state_changed: false,
            throttle: Throttle::Stop,
            steering: Steering::Hold,
            turret: TurretOrder::Hold,
            action: None,
            aim_locked: ctx.aim_locked,
        }
    }

    fn transition(mut self, from: TankState, to: TankState) -> Self {
        self.new_state = to;
        self.state_changed = from != to;
        self
    }
}

/// State change caused by a mailbox message, if any.
///
/// `Hit` and `Collected` never change a tank's state directly; damage is
/// applied by the caller and the death check runs in `evaluate`.
pub fn react(state: TankState, kind: MessageKind) -> Option<TankState> {
    if state.is_dead() {
        return None;
    }
    match kind {
        MessageKind::Stop => Some(TankState::Inactive),
        MessageKind::Start => Some(TankState::Patrol),
        MessageKind::Evade => Some(TankState::Evade),
        MessageKind::Help => matches!(
            state,
            TankState::Patrol | TankState::Aim | TankState::Evade
        )
        .then_some(TankState::Aim),
        MessageKind::Hit | MessageKind::Collected => None,
    }
}

/// Evaluate the FSM for one tank.
pub fn evaluate(ctx: &TankContext) -> TankDecision {
    let decision = match ctx.state {
        TankState::Inactive | TankState::Dead => TankDecision::hold(ctx),
        TankState::Patrol => evaluate_patrol(ctx),
        TankState::Aim => evaluate_aim(ctx),
        TankState::Evade => evaluate_evade(ctx),
        TankState::Guard => evaluate_guard(ctx),
        TankState::Empty => evaluate_empty(ctx),
    };

    // Out of hit points: whatever the behaviour wanted, the tank is done.
    if ctx.hp <= 0 && !ctx.state.is_dead() {
        return TankDecision {
            throttle: Throttle::Stop,
            steering: Steering::Hold,
            turret: TurretOrder::Hold,
            action: (!ctx.broken).then_some(TankAction::Wreck),
            ..decision.transition(ctx.state, TankState::Dead)
        };
    }

    if ctx.state.is_dead() && !ctx.broken {
        return TankDecision {
            action: Some(TankAction::Wreck),
            ..decision
        };
    }

    decision
}

fn evaluate_patrol(ctx: &TankContext) -> TankDecision {
    let decision = TankDecision {
        throttle: Throttle::Full,
        steering: Steering::Waypoint,
        turret: TurretOrder::Sweep,
        ..TankDecision::hold(ctx)
    };

    if ctx.enemy_in_view {
        return TankDecision {
            aim_locked: false,
            ..decision.transition(ctx.state, TankState::Aim)
        };
    }
    decision
}

fn evaluate_aim(ctx: &TankContext) -> TankDecision {
    let decision = TankDecision::hold(ctx);

    if ctx.aim_elapsed_secs < AIM_DURATION_SECS {
        // Track until the turret is on target once, then hold still.
        let locked = ctx.aim_locked || (ctx.enemy_in_view && ctx.on_target);
        let turret = if ctx.enemy_in_view && !locked {
            TurretOrder::Track
        } else {
            TurretOrder::Hold
        };
        return TankDecision {
            turret,
            aim_locked: locked,
            ..decision
        };
    }

    if ctx.ammunition == 0 {
        return TankDecision {
            aim_locked: false,
            ..decision.transition(ctx.state, TankState::Empty)
        };
    }

    if ctx.guarding {
        TankDecision {
            action: Some(TankAction::Fire {
                request_evade: false,
            }),
            aim_locked: false,
            ..decision.transition(ctx.state, TankState::Guard)
        }
    } else {
        TankDecision {
            action: Some(TankAction::Fire {
                request_evade: true,
            }),
            aim_locked: false,
            ..decision
        }
    }
}

fn evaluate_evade(ctx: &TankContext) -> TankDecision {
    let decision = TankDecision {
        throttle: Throttle::Full,
        steering: Steering::EvadeTarget,
        turret: TurretOrder::Align,
        ..TankDecision::hold(ctx)
    };

    match ctx.evade_distance {
        Some(distance) if distance >= ARRIVAL_RADIUS => decision,
        _ => TankDecision {
            throttle: Throttle::Stop,
            steering: Steering::Hold,
            ..decision.transition(ctx.state, TankState::Patrol)
        },
    }
}

fn evaluate_guard(ctx: &TankContext) -> TankDecision {
    let decision = TankDecision {
        throttle: Throttle::Full,
        steering: Steering::GuardTarget,
        turret: TurretOrder::Align,
        ..TankDecision::hold(ctx)
    };

    match ctx.guard_distance {
        Some(distance) if distance >= ARRIVAL_RADIUS => decision,
        _ => TankDecision {
            throttle: Throttle::Stop,
            steering: Steering::Hold,
            action: Some(TankAction::StandDown),
            ..decision.transition(ctx.state, TankState::Patrol)
        },
    }
}

fn evaluate_empty(ctx: &TankContext) -> TankDecision {
    let decision = TankDecision {
        turret: TurretOrder::Align,
        ..TankDecision::hold(ctx)
    };

    let Some(contact) = ctx.nearest_ammo else {
        return decision;
    };

    let decision = if contact.grounded {
        TankDecision {
            throttle: Throttle::Full,
            steering: Steering::Ammo,
            ..decision
        }
    } else {
        decision
    };

    if contact.distance < ARRIVAL_RADIUS {
        return TankDecision {
            action: Some(TankAction::CollectAmmo),
            ..decision.transition(ctx.state, TankState::Patrol)
        };
    }
    decision
}

//! Simulation constants and tuning parameters.

use std::f32::consts::PI;

/// Default fixed tick rate (Hz) used by `SimulationEngine::step`.
pub const TICK_RATE: u32 = 60;

/// Seconds per fixed tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Degrees to radians.
pub const fn to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

// --- Transform layout ---

/// Index of the tank body matrix (relative to root).
pub const TANK_BODY_PART: usize = 1;

/// Index of the tank turret matrix (relative to root).
pub const TANK_TURRET_PART: usize = 2;

// --- Sensing ---

/// Maximum distance at which a tank can see an enemy (units).
pub const VIEW_DISTANCE: f32 = 100.0;

/// Half-angle of the view cone used to spot enemies.
pub const VIEW_HALF_ANGLE: f32 = to_radians(15.0);

/// Half-angle within which the turret counts as aligned on target.
pub const AIM_ALIGNED_ANGLE: f32 = to_radians(1.0);

/// Distance at which a moving tank counts as having reached a point.
pub const ARRIVAL_RADIUS: f32 = 2.0;

// --- Aiming and firing ---

/// Time spent aiming before the shot is taken (seconds).
pub const AIM_DURATION_SECS: f32 = 1.0;

/// Ammunition a tank starts with.
pub const INITIAL_AMMUNITION: u32 = 10;

/// Ammunition gained from one crate.
pub const AMMO_CRATE_ROUNDS: u32 = 10;

/// Maximum offset of a random evade point from the tank (units, X and Z).
pub const EVADE_OFFSET: f32 = 40.0;

/// Maximum offset of a guard point from the tank that called for help.
pub const GUARD_OFFSET: f32 = 10.0;

// --- Turret ---

/// Relative yaw beyond which an idle turret is turned back to the body.
pub const TURRET_ALIGN_TOLERANCE: f32 = to_radians(3.0);

/// Turret correction per tick while re-aligning with the body (radians).
pub const TURRET_ALIGN_STEP: f32 = 0.02;

// --- Patrol ---

/// Offset along world Z of the default patrol waypoints from the spawn point.
pub const DEFAULT_PATROL_OFFSET: f32 = 30.0;

// --- Death ---

/// Range of the one-off death tumble about each axis (degrees).
pub const DEATH_TUMBLE_MIN_DEG: f32 = 45.0;
pub const DEATH_TUMBLE_MAX_DEG: f32 = 90.0;

/// Distance a destroyed tank sinks toward the ground.
pub const DEATH_DROP: f32 = 1.0;

// --- Shells ---

/// Shell muzzle speed (units per second).
pub const SHELL_SPEED: f32 = 100.0;

/// Shell lifetime before self-destruction (seconds).
pub const SHELL_LIFETIME_SECS: f32 = 2.0;

/// Distance from a tank at which a shell hits.
pub const SHELL_HIT_RADIUS: f32 = 2.0;

// --- Ammo crates ---

/// Height lost per tick by a falling crate.
pub const AMMO_FALL_PER_TICK: f32 = 0.1;

/// Height below which a crate is considered on the ground and collectable.
pub const AMMO_GROUNDED_HEIGHT: f32 = 1.0;

/// Height at which dropped crates appear.
pub const AMMO_DROP_HEIGHT: f32 = 50.0;

/// Half-size of the square area crates are dropped into.
pub const AMMO_DROP_EXTENT: f32 = 100.0;

/// Range of the delay between crate drops (seconds).
pub const AMMO_DROP_MIN_SECS: f32 = 5.0;
pub const AMMO_DROP_MAX_SECS: f32 = 15.0;

/// Uniform scale applied to dropped crates.
pub const AMMO_DROP_SCALE: f32 = 0.5;

// --- Template names used by runtime spawns ---

/// Template used for shells fired by tanks.
pub const SHELL_TEMPLATE: &str = "Shell Type 1";

/// Template used for dropped ammo crates.
pub const AMMO_TEMPLATE: &str = "Ammo";

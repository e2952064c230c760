//! Targeting geometry: view cone checks and turret stepping.

use glam::Vec3;

use skirmish_core::types::wrap_angle;

/// Angle (radians) between the facing vector and the direction from
/// `from` to `to`. Returns `None` when the two points coincide or the
/// facing vector is degenerate.
pub fn view_angle(facing: Vec3, from: Vec3, to: Vec3) -> Option<f32> {
    let direction = (to - from).try_normalize()?;
    let facing = facing.try_normalize()?;
    Some(direction.dot(facing).clamp(-1.0, 1.0).acos())
}

/// Whether `to` lies inside the cone of `half_angle` around `facing`.
pub fn in_view_cone(facing: Vec3, from: Vec3, to: Vec3, half_angle: f32) -> bool {
    view_angle(facing, from, to).is_some_and(|angle| angle <= half_angle)
}

/// World yaw that faces from `from` toward `to` (0 = +Z, growing toward +X).
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    let delta = to - from;
    delta.x.atan2(delta.z)
}

/// Signed rotation to apply this tick to turn from `current_yaw` toward
/// `desired_yaw`, never more than `max_step` and never overshooting.
pub fn turn_step(current_yaw: f32, desired_yaw: f32, max_step: f32) -> f32 {
    let error = wrap_angle(desired_yaw - current_yaw);
    error.clamp(-max_step.abs(), max_step.abs())
}

/// Rotation to apply to a turret whose yaw relative to the body is
/// `relative_yaw`: a fixed `step` back toward zero when it is off by more
/// than `tolerance`, nothing otherwise.
pub fn align_step(relative_yaw: f32, tolerance: f32, step: f32) -> f32 {
    let offset = wrap_angle(relative_yaw);
    if offset > tolerance {
        -step
    } else if offset < -tolerance {
        step
    } else {
        0.0
    }
}

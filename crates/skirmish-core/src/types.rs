//! Fundamental geometric and simulation types.
//!
//! World space is Y-up. Entities move along their local Z axis, so a yaw of
//! zero faces world +Z and yaw grows toward +X.

use std::f32::consts::{PI, TAU};
use std::fmt;

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Unique entity identifier. Allocated in increasing order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Uid(pub u32);

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hierarchical transform: index 0 is the root (world space), every other
/// index is a part expressed relative to the root.
///
/// A tank carries three matrices: root, body and turret.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    parts: Vec<Mat4>,
}

impl Transform {
    /// Root built from position, XYZ Euler rotation (radians) and scale, plus
    /// `extra_parts` identity matrices for child parts.
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3, extra_parts: usize) -> Self {
        let rotation = Quat::from_euler(EulerRot::YXZ, rotation.y, rotation.x, rotation.z);
        let root = Mat4::from_scale_rotation_translation(scale, rotation, position);
        let mut parts = Vec::with_capacity(extra_parts + 1);
        parts.push(root);
        parts.extend(std::iter::repeat(Mat4::IDENTITY).take(extra_parts));
        Self { parts }
    }

    /// Single-matrix transform at `position` with no rotation.
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO, Vec3::ONE, 0)
    }

    /// Number of matrices including the root.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn root(&self) -> &Mat4 {
        &self.parts[0]
    }

    pub fn root_mut(&mut self) -> &mut Mat4 {
        &mut self.parts[0]
    }

    /// Matrix of part `index`, relative to the root (index 0 is the root itself).
    pub fn part(&self, index: usize) -> Option<&Mat4> {
        self.parts.get(index)
    }

    pub fn part_mut(&mut self, index: usize) -> Option<&mut Mat4> {
        self.parts.get_mut(index)
    }

    /// World matrix of part `index`: root × part.
    pub fn world(&self, index: usize) -> Option<Mat4> {
        match index {
            0 => Some(self.parts[0]),
            _ => self.parts.get(index).map(|part| self.parts[0] * *part),
        }
    }

    /// World position of the root.
    pub fn position(&self) -> Vec3 {
        self.parts[0].w_axis.truncate()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.parts[0].w_axis = position.extend(1.0);
    }

    /// Normalised world-space forward (local Z) axis of part `index`.
    pub fn forward(&self, index: usize) -> Vec3 {
        self.world(index)
            .map(|m| m.z_axis.truncate().normalize_or_zero())
            .unwrap_or(Vec3::Z)
    }

    /// Move the root along its own Z axis.
    pub fn move_local_z(&mut self, distance: f32) {
        let axis = self.parts[0].z_axis.truncate().normalize_or_zero();
        self.translate(axis * distance);
    }

    /// Move the root along its own Y axis.
    pub fn move_local_y(&mut self, distance: f32) {
        let axis = self.parts[0].y_axis.truncate().normalize_or_zero();
        self.translate(axis * distance);
    }

    /// Move the root in world space.
    pub fn translate(&mut self, offset: Vec3) {
        let position = self.position() + offset;
        self.set_position(position);
    }

    /// Rotate part `index` about its own Y axis.
    pub fn rotate_part_y(&mut self, index: usize, angle: f32) {
        if let Some(part) = self.parts.get_mut(index) {
            *part *= Mat4::from_rotation_y(angle);
        }
    }

    /// Apply a local rotation (about X, then Y, then Z) to part `index`.
    pub fn rotate_part_local(&mut self, index: usize, angles: Vec3) {
        if let Some(part) = self.parts.get_mut(index) {
            *part = *part
                * Mat4::from_rotation_x(angles.x)
                * Mat4::from_rotation_y(angles.y)
                * Mat4::from_rotation_z(angles.z);
        }
    }

    /// Uniformly rescale the root, keeping rotation and position.
    pub fn set_scale(&mut self, scale: Vec3) {
        let (_, rotation, translation) = self.parts[0].to_scale_rotation_translation();
        self.parts[0] = Mat4::from_scale_rotation_translation(scale, rotation, translation);
    }

    /// Turn the root about world Y so its forward axis points at `target` in
    /// the XZ plane. Scale and position are kept; pitch and roll are cleared.
    pub fn face_target(&mut self, target: Vec3) {
        let position = self.position();
        let delta = target - position;
        if delta.x.abs() < f32::EPSILON && delta.z.abs() < f32::EPSILON {
            return;
        }
        let (scale, _, _) = self.parts[0].to_scale_rotation_translation();
        let yaw = delta.x.atan2(delta.z);
        self.parts[0] =
            Mat4::from_scale_rotation_translation(scale, Quat::from_rotation_y(yaw), position);
    }

    /// Decompose the world matrix of part `index` into
    /// (position, Euler rotation XYZ in radians, scale).
    pub fn decompose(&self, index: usize) -> Option<(Vec3, Vec3, Vec3)> {
        self.world(index).map(|m| {
            let (scale, rotation, translation) = m.to_scale_rotation_translation();
            let (y, x, z) = rotation.to_euler(EulerRot::YXZ);
            (translation, Vec3::new(x, y, z), scale)
        })
    }

    /// World-space yaw of part `index`.
    pub fn world_yaw(&self, index: usize) -> f32 {
        self.decompose(index).map(|(_, euler, _)| euler.y).unwrap_or(0.0)
    }

    /// Yaw of part `index` relative to the root.
    pub fn relative_yaw(&self, index: usize) -> f32 {
        self.parts
            .get(index)
            .map(|m| {
                let (_, rotation, _) = m.to_scale_rotation_translation();
                rotation.to_euler(EulerRot::YXZ).0
            })
            .unwrap_or(0.0)
    }
}

/// Distance between two points ignoring height.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

/// Wrap an angle into [-PI, PI).
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}

//! ECS components for hecs entities, plus the shared entity templates.
//!
//! Components are plain data. Behaviour lives in the simulation systems and
//! in the tank decision logic.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{INITIAL_AMMUNITION, SHELL_SPEED};
use crate::enums::{TankState, TemplateKind};
use crate::types::Uid;

/// Tank statistics shared by every tank built from a template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankStats {
    /// Top speed along the facing direction (units/s).
    pub max_speed: f32,
    pub acceleration: f32,
    /// Body turn speed (radians/s).
    pub turn_speed: f32,
    /// Turret turn speed (radians/s).
    pub turret_turn_speed: f32,
    /// Initial and maximum hit points.
    pub max_hp: i32,
    /// HP removed by one shell fired by this kind of tank.
    pub shell_damage: i32,
}

/// Immutable template shared by every entity of one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    pub kind: TemplateKind,
    pub name: String,
    pub mesh: String,
    /// Present only on tank templates.
    #[serde(default)]
    pub tank: Option<TankStats>,
}

impl EntityTemplate {
    pub fn new(kind: TemplateKind, name: impl Into<String>, mesh: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            mesh: mesh.into(),
            tank: None,
        }
    }

    pub fn tank(name: impl Into<String>, mesh: impl Into<String>, stats: TankStats) -> Self {
        Self {
            kind: TemplateKind::Tank,
            name: name.into(),
            mesh: mesh.into(),
            tank: Some(stats),
        }
    }
}

/// Identity attached to every entity.
#[derive(Debug, Clone)]
pub struct EntityInfo {
    pub uid: Uid,
    pub name: String,
    pub template: Arc<EntityTemplate>,
}

/// A cached "nearest" query result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    pub uid: Uid,
    pub distance: f32,
}

/// Per-tank instance state.
#[derive(Debug, Clone)]
pub struct Tank {
    pub team: u32,
    pub hp: i32,
    pub state: TankState,
    pub ammunition: u32,
    pub shots_fired: u32,
    /// Cyclic patrol route in world space.
    pub patrol_route: Vec<Vec3>,
    pub next_waypoint: usize,
    /// Seconds spent in the current aim.
    pub aim_elapsed_secs: f32,
    /// Set once the turret got within the fine aim angle; stops further tracking.
    pub aim_locked: bool,
    pub nearest_enemy: Option<Sighting>,
    pub nearest_ammo: Option<Sighting>,
    pub evade_target: Option<Vec3>,
    pub guard_target: Option<Vec3>,
    pub guarding: bool,
    /// The death tumble has been applied.
    pub broken: bool,
    /// Speed applied along the facing direction this tick.
    pub speed: f32,
}

impl Tank {
    pub fn new(team: u32, stats: &TankStats, patrol_route: Vec<Vec3>) -> Self {
        Self {
            team,
            hp: stats.max_hp,
            state: TankState::Inactive,
            ammunition: INITIAL_AMMUNITION,
            shots_fired: 0,
            patrol_route,
            next_waypoint: 0,
            aim_elapsed_secs: 0.0,
            aim_locked: false,
            nearest_enemy: None,
            nearest_ammo: None,
            evade_target: None,
            guard_target: None,
            guarding: false,
            broken: false,
            speed: 0.0,
        }
    }

    /// Apply shell damage. HP never increases.
    pub fn hit(&mut self, damage: i32) {
        self.hp = self.hp.saturating_sub(damage.max(0));
    }

    pub fn is_dead(&self) -> bool {
        self.state.is_dead()
    }

    /// Current patrol waypoint, if the route is not empty.
    pub fn waypoint(&self) -> Option<Vec3> {
        self.patrol_route.get(self.next_waypoint).copied()
    }

    /// Move on to the next waypoint, wrapping around.
    pub fn advance_waypoint(&mut self) {
        if !self.patrol_route.is_empty() {
            self.next_waypoint = (self.next_waypoint + 1) % self.patrol_route.len();
        }
    }

    pub fn reset_aim(&mut self) {
        self.aim_elapsed_secs = 0.0;
        self.aim_locked = false;
    }
}

/// Projectile state.
#[derive(Debug, Clone, Copy)]
pub struct Shell {
    pub team: u32,
    pub damage: i32,
    pub speed: f32,
    pub elapsed_secs: f32,
}

impl Shell {
    pub fn new(team: u32, damage: i32) -> Self {
        Self {
            team,
            damage,
            speed: SHELL_SPEED,
            elapsed_secs: 0.0,
        }
    }
}

/// Ammo crate marker. Crates have no instance data beyond their transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmmoCrate;

/// Scenery marker (trees and the like).
#[derive(Debug, Clone, Copy, Default)]
pub struct Scenery;

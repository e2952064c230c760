//! Scenario definitions: templates, tanks, scenery and arena layout.
//!
//! Scenarios are plain serde data so they can be loaded from JSON; the
//! built-in default reproduces the classic two-team skirmish around a single
//! building with a scattered forest.

use std::fs;
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use skirmish_arena::Arena;
use skirmish_core::components::{EntityTemplate, TankStats};
use skirmish_core::constants::{AMMO_TEMPLATE, SHELL_TEMPLATE};
use skirmish_core::enums::TemplateKind;
use skirmish_core::SkirmishError;

/// Errors raised while loading or building a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Setup(#[from] SkirmishError),
}

/// A tank placed at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankPlacement {
    pub template: String,
    pub team: u32,
    pub name: String,
    pub position: Vec3,
    /// Initial heading in degrees (0 faces +Z).
    #[serde(default)]
    pub heading_degrees: f32,
    /// Cyclic patrol route; empty means the default two-point route.
    #[serde(default)]
    pub patrol: Vec<Vec3>,
}

/// A single non-tank entity placed at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityPlacement {
    pub template: String,
    pub name: String,
    pub position: Vec3,
    /// Random jitter: each axis moves by up to half this amount either way.
    #[serde(default)]
    pub randomise: Vec3,
    /// Euler rotation in degrees.
    #[serde(default)]
    pub rotation_degrees: Vec3,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
}

/// Many copies of one scenery template scattered over a rectangle (x, z)
/// with random headings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scatter {
    pub template: String,
    /// Entities are named `"{prefix} {index}"`.
    pub prefix: String,
    pub count: u32,
    pub min: Vec2,
    pub max: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub templates: Vec<EntityTemplate>,
    #[serde(default)]
    pub tanks: Vec<TankPlacement>,
    #[serde(default)]
    pub entities: Vec<EntityPlacement>,
    #[serde(default)]
    pub scatter: Vec<Scatter>,
    #[serde(default)]
    pub arena: Arena,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl Scenario {
    /// Load a scenario from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Two teams of two tanks around the central building.
    pub fn skirmish() -> Self {
        let scout = TankStats {
            max_speed: 10.0,
            acceleration: 2.2,
            turn_speed: 2.0,
            turret_turn_speed: 0.9,
            max_hp: 100,
            shell_damage: 20,
        };
        let heavy = TankStats {
            max_speed: 8.0,
            acceleration: 1.6,
            turn_speed: 1.4,
            turret_turn_speed: 0.7,
            max_hp: 140,
            shell_damage: 30,
        };

        let tank = |template: &str, team, name: &str, position: Vec3, heading_degrees| {
            TankPlacement {
                template: template.to_string(),
                team,
                name: name.to_string(),
                position,
                heading_degrees,
                patrol: Vec::new(),
            }
        };

        Self {
            name: "Skirmish".to_string(),
            templates: vec![
                EntityTemplate::tank("Rogue Scout", "HoverTank02.x", scout),
                EntityTemplate::tank("Oberon MkII", "HoverTank07.x", heavy),
                EntityTemplate::new(TemplateKind::Shell, SHELL_TEMPLATE, "Bullet.x"),
                EntityTemplate::new(TemplateKind::Ammo, AMMO_TEMPLATE, "Cube.x"),
                EntityTemplate::new(TemplateKind::Scenery, "Tree", "Tree1.x"),
                EntityTemplate::new(TemplateKind::Scenery, "Building", "Building03.x"),
            ],
            tanks: vec![
                tank("Rogue Scout", 0, "A-1", Vec3::new(-30.0, 0.5, -20.0), 90.0),
                tank("Oberon MkII", 0, "A-2", Vec3::new(-40.0, 0.5, 10.0), 90.0),
                tank("Rogue Scout", 1, "B-1", Vec3::new(30.0, 0.5, -20.0), -90.0),
                tank("Oberon MkII", 1, "B-2", Vec3::new(40.0, 0.5, 10.0), -90.0),
            ],
            entities: vec![EntityPlacement {
                template: "Building".to_string(),
                name: "Building".to_string(),
                position: Vec3::new(0.0, 0.0, 40.0),
                randomise: Vec3::ZERO,
                rotation_degrees: Vec3::ZERO,
                scale: Vec3::ONE,
            }],
            scatter: vec![Scatter {
                template: "Tree".to_string(),
                prefix: "Tree".to_string(),
                count: 100,
                min: Vec2::new(-200.0, 40.0),
                max: Vec2::new(30.0, 150.0),
            }],
            arena: Arena::with_default_building(),
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::skirmish()
    }
}

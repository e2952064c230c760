//! Occluders: static rectangles in the XZ plane that block sight.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Bounds of the building in the default arena (world units, XZ plane).
const BUILDING_MIN: Vec2 = Vec2::new(-7.36, -4.35 + 40.0);
const BUILDING_MAX: Vec2 = Vec2::new(5.12, 5.36 + 40.0);

/// A rectangle on the ground plane. Corners are stored as (x, z) pairs in
/// winding order; the rectangle need not be axis aligned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Occluder {
    pub corners: [Vec2; 4],
}

impl Occluder {
    pub fn new(corners: [Vec2; 4]) -> Self {
        Self { corners }
    }

    /// Axis-aligned rectangle spanning `min..=max` (x, z).
    pub fn from_bounds(min: Vec2, max: Vec2) -> Self {
        Self {
            corners: [
                Vec2::new(min.x, min.y),
                Vec2::new(max.x, min.y),
                Vec2::new(max.x, max.y),
                Vec2::new(min.x, max.y),
            ],
        }
    }

    /// The building in the middle of the default level.
    pub fn default_building() -> Self {
        Self::from_bounds(BUILDING_MIN, BUILDING_MAX)
    }

    /// Bounding extent of the corners: (min, max).
    pub fn bounds(&self) -> (Vec2, Vec2) {
        self.corners.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), c| (min.min(*c), max.max(*c)),
        )
    }

    /// Whether a ground-plane point lies inside the bounding extent.
    pub fn contains(&self, point: Vec3) -> bool {
        let (min, max) = self.bounds();
        let p = planar(point);
        p.cmpge(min).all() && p.cmple(max).all()
    }
}

/// The static layout tanks fight in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    #[serde(default)]
    pub occluders: Vec<Occluder>,
}

impl Arena {
    /// Arena with no obstacles.
    pub fn open() -> Self {
        Self::default()
    }

    /// The default level: a single building.
    pub fn with_default_building() -> Self {
        Self {
            occluders: vec![Occluder::default_building()],
        }
    }
}

/// Project a world point onto the ground plane as (x, z).
pub fn planar(point: Vec3) -> Vec2 {
    Vec2::new(point.x, point.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_building_bounds() {
        let (min, max) = Occluder::default_building().bounds();
        assert!(min.abs_diff_eq(Vec2::new(-7.36, 35.65), 1e-4));
        assert!(max.abs_diff_eq(Vec2::new(5.12, 45.36), 1e-4));
    }

    #[test]
    fn test_contains_uses_xz() {
        let building = Occluder::default_building();
        assert!(building.contains(Vec3::new(0.0, 100.0, 40.0)));
        assert!(!building.contains(Vec3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_arena_deserializes_without_occluders() {
        let arena: Arena = serde_json::from_str("{}").unwrap();
        assert!(arena.occluders.is_empty());
        assert_eq!(Arena::with_default_building().occluders.len(), 1);
    }
}

//! Line-of-sight calculation against rectangular occluders.
//!
//! The test is two-dimensional: heights are ignored and every occluder is
//! treated as infinitely tall.

use glam::{Vec2, Vec3};

use crate::occluder::{planar, Arena, Occluder};

/// Check line-of-sight between two world points across the whole arena.
///
/// Returns true if no occluder crosses the straight ground-plane segment
/// from `from` to `to`.
pub fn has_line_of_sight(arena: &Arena, from: Vec3, to: Vec3) -> bool {
    let (a, b) = (planar(from), planar(to));
    arena
        .occluders
        .iter()
        .all(|occluder| segment_clear_of(occluder, a, b))
}

/// Check whether the segment `from`–`to` (x, z) misses one occluder.
///
/// First a bounding-extent rejection: a segment lying wholly to one side of
/// the rectangle on either axis cannot cross it. Otherwise each corner is
/// classified against the segment's line; the segment is clear only if every
/// corner falls strictly on the same side.
pub fn segment_clear_of(occluder: &Occluder, from: Vec2, to: Vec2) -> bool {
    let (min, max) = occluder.bounds();
    let seg_min = from.min(to);
    let seg_max = from.max(to);
    if seg_max.x < min.x || seg_min.x > max.x || seg_max.y < min.y || seg_min.y > max.y {
        return true;
    }

    let sides = occluder.corners.map(|corner| side_of_line(from, to, corner));
    sides.iter().all(|s| *s > 0.0) || sides.iter().all(|s| *s < 0.0)
}

/// Signed line equation value of `point` against the line through `a` and
/// `b`. Zero on the line; the sign tells which side.
fn side_of_line(a: Vec2, b: Vec2, point: Vec2) -> f32 {
    (b.y - a.y) * point.x + (a.x - b.x) * point.y + (b.x * a.y - a.x * b.y)
}

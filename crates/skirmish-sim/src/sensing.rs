//! Tank sensing: nearest enemy, nearest ammo crate, and the view check.

use glam::Vec3;

use skirmish_arena::{has_line_of_sight, Arena};
use skirmish_core::components::Sighting;
use skirmish_core::constants::{TANK_TURRET_PART, VIEW_DISTANCE};
use skirmish_core::enums::TemplateKind;
use skirmish_core::types::planar_distance;
use skirmish_core::Uid;
use skirmish_tank_ai::targeting::in_view_cone;

use crate::context::SimContext;
use crate::entity_manager::{EntityFilter, EntityManager};

/// Closest live enemy tank (other team, not dead) within view distance.
/// Ties go to the earliest created tank.
pub fn nearest_enemy(entities: &EntityManager, position: Vec3, team: u32) -> Option<Sighting> {
    entities
        .tanks()
        .filter_map(|view| {
            let hostile = view.tank().is_some_and(|t| t.team != team && !t.is_dead());
            if !hostile {
                return None;
            }
            let distance = planar_distance(position, view.position()?);
            (distance < VIEW_DISTANCE).then_some(Sighting {
                uid: view.uid(),
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Closest ammo crate, at any distance.
pub fn nearest_ammo(entities: &EntityManager, position: Vec3) -> Option<Sighting> {
    entities
        .enumerate(EntityFilter::kind(TemplateKind::Ammo))
        .filter_map(|view| {
            Some(Sighting {
                uid: view.uid(),
                distance: planar_distance(position, view.position()?),
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Whether the turret facing `facing` from `position` has `target` inside a
/// cone of `half_angle`, within view distance and with clear line of sight.
pub fn can_see(
    entities: &EntityManager,
    arena: &Arena,
    position: Vec3,
    facing: Vec3,
    target: Uid,
    half_angle: f32,
) -> bool {
    let Some(view) = entities.get(target) else {
        return false;
    };
    if view.tank().map_or(true, |t| t.is_dead()) {
        return false;
    }
    let Some(target_position) = view.position() else {
        return false;
    };
    planar_distance(position, target_position) <= VIEW_DISTANCE
        && has_line_of_sight(arena, position, target_position)
        && in_view_cone(facing, position, target_position, half_angle)
}

/// Rescan for the nearest enemy of tank `uid`, store the result in its
/// cache, and report whether its turret is looking at that enemy.
pub fn look_for_enemy(ctx: &mut SimContext, uid: Uid, half_angle: f32) -> bool {
    let Some(view) = ctx.entities.get(uid) else {
        return false;
    };
    let (Some(team), Some(transform)) = (view.team(), view.transform()) else {
        return false;
    };
    let position = transform.position();
    let facing = transform.forward(TANK_TURRET_PART);
    drop(transform);

    let sighting = nearest_enemy(&ctx.entities, position, team);
    if let Some((tank, _)) = ctx.entities.tank_mut(uid) {
        tank.nearest_enemy = sighting;
    }

    sighting.is_some_and(|s| {
        can_see(&ctx.entities, &ctx.arena, position, facing, s.uid, half_angle)
    })
}

use std::f32::consts::{FRAC_PI_2, PI};

use approx::assert_abs_diff_eq;
use glam::Vec3;

use crate::commands::SimCommand;
use crate::components::{EntityTemplate, Tank, TankStats};
use crate::constants::*;
use crate::enums::*;
use crate::events::{Message, SimEvent};
use crate::types::{planar_distance, wrap_angle, SimTime, Transform, Uid};

fn stats() -> TankStats {
    TankStats {
        max_speed: 10.0,
        acceleration: 2.0,
        turn_speed: 1.0,
        turret_turn_speed: 2.0,
        max_hp: 100,
        shell_damage: 20,
    }
}

// ---- Transform ----

#[test]
fn test_transform_position_round_trip() {
    let mut t = Transform::at(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
    t.set_position(Vec3::new(-4.0, 0.0, 9.0));
    assert_eq!(t.position(), Vec3::new(-4.0, 0.0, 9.0));
}

#[test]
fn test_move_local_z_follows_facing() {
    let mut t = Transform::at(Vec3::ZERO);
    t.move_local_z(5.0);
    assert!(t.position().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));

    t.face_target(Vec3::new(10.0, 0.0, 5.0));
    t.move_local_z(2.0);
    assert!(t.position().abs_diff_eq(Vec3::new(2.0, 0.0, 5.0), 1e-5));
}

#[test]
fn test_face_target_sets_yaw_and_keeps_scale() {
    let mut t = Transform::new(Vec3::ZERO, Vec3::ZERO, Vec3::splat(0.5), 0);
    t.face_target(Vec3::new(-3.0, 7.0, 0.0));
    assert_abs_diff_eq!(t.world_yaw(0), -FRAC_PI_2, epsilon = 1e-5);
    let (_, _, scale) = t.decompose(0).unwrap();
    assert!(scale.abs_diff_eq(Vec3::splat(0.5), 1e-5));
}

#[test]
fn test_face_target_on_top_of_self_is_noop() {
    let mut t = Transform::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), Vec3::ONE, 0);
    t.face_target(Vec3::new(0.0, 5.0, 0.0));
    assert_abs_diff_eq!(t.world_yaw(0), 1.0, epsilon = 1e-5);
}

#[test]
fn test_part_world_matrix_composes_with_root() {
    let mut t = Transform::new(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, Vec3::ONE, 2);
    t.rotate_part_y(TANK_TURRET_PART, FRAC_PI_2);
    t.face_target(Vec3::new(5.0, 0.0, -10.0));

    // Root faces -Z (yaw PI), turret is a quarter turn further.
    assert_abs_diff_eq!(t.relative_yaw(TANK_TURRET_PART), FRAC_PI_2, epsilon = 1e-5);
    assert_abs_diff_eq!(
        wrap_angle(t.world_yaw(TANK_TURRET_PART) - (PI + FRAC_PI_2)),
        0.0,
        epsilon = 1e-4
    );
    let forward = t.forward(TANK_TURRET_PART);
    assert!(forward.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));
}

#[test]
fn test_missing_part_is_none() {
    let t = Transform::at(Vec3::ZERO);
    assert!(t.part(1).is_none());
    assert!(t.world(3).is_none());
    assert_eq!(t.part_count(), 1);
}

#[test]
fn test_wrap_angle() {
    assert_abs_diff_eq!(wrap_angle(3.0 * PI / 2.0), -FRAC_PI_2, epsilon = 1e-5);
    assert_abs_diff_eq!(wrap_angle(-3.0 * PI / 2.0), FRAC_PI_2, epsilon = 1e-5);
    assert_abs_diff_eq!(wrap_angle(0.25), 0.25, epsilon = 1e-6);
}

#[test]
fn test_planar_distance_ignores_height() {
    let d = planar_distance(Vec3::new(0.0, 50.0, 0.0), Vec3::new(3.0, 0.0, 4.0));
    assert_abs_diff_eq!(d, 5.0, epsilon = 1e-6);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    time.advance(0.5);
    time.advance(0.25);
    assert_eq!(time.tick, 2);
    assert_abs_diff_eq!(time.elapsed_secs, 0.75, epsilon = 1e-9);
}

// ---- Tank component ----

#[test]
fn test_new_tank_starts_inactive_with_full_hp() {
    let tank = Tank::new(1, &stats(), vec![]);
    assert_eq!(tank.state, TankState::Inactive);
    assert_eq!(tank.hp, 100);
    assert_eq!(tank.ammunition, INITIAL_AMMUNITION);
    assert!(tank.waypoint().is_none());
}

#[test]
fn test_hit_never_heals() {
    let mut tank = Tank::new(0, &stats(), vec![]);
    tank.hit(30);
    assert_eq!(tank.hp, 70);
    tank.hit(-50);
    assert_eq!(tank.hp, 70);
    tank.hit(i32::MAX);
    tank.hit(i32::MAX);
    assert_eq!(tank.hp, i32::MIN);
}

#[test]
fn test_waypoints_cycle() {
    let route = vec![Vec3::X, Vec3::Z, Vec3::NEG_X];
    let mut tank = Tank::new(0, &stats(), route);
    assert_eq!(tank.waypoint(), Some(Vec3::X));
    tank.advance_waypoint();
    tank.advance_waypoint();
    assert_eq!(tank.waypoint(), Some(Vec3::NEG_X));
    tank.advance_waypoint();
    assert_eq!(tank.waypoint(), Some(Vec3::X));
}

#[test]
fn test_tank_template_carries_stats() {
    let template = EntityTemplate::tank("Rogue Scout", "HoverTank01.x", stats());
    assert_eq!(template.kind, TemplateKind::Tank);
    assert_eq!(template.tank.map(|s| s.shell_damage), Some(20));
    let tree = EntityTemplate::new(TemplateKind::Scenery, "Tree", "Tree1.x");
    assert!(tree.tank.is_none());
}

// ---- Wire formats ----

#[test]
fn test_message_serde() {
    let msg = Message::new(MessageKind::Help, Some(Uid(7)));
    let json = serde_json::to_string(&msg).unwrap();
    let back: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(msg, back);
    assert_eq!(Message::anonymous(MessageKind::Start).from, None);
}

#[test]
fn test_command_serde_is_tagged() {
    let cmd = SimCommand::Relocate {
        uid: Uid(3),
        x: 1.0,
        z: -2.0,
    };
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains("\"type\":\"Relocate\""));
    let back: SimCommand = serde_json::from_str(&json).unwrap();
    assert_eq!(cmd, back);
}

#[test]
fn test_event_serde_is_tagged() {
    let event = SimEvent::TankStateChanged {
        uid: Uid(1),
        from: TankState::Patrol,
        to: TankState::Aim,
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"TankStateChanged\""));
}

#[test]
fn test_state_labels() {
    assert_eq!(TankState::Guard.to_string(), "Guard");
    assert_eq!(TemplateKind::Ammo.to_string(), "Ammo");
    assert!(TankState::Dead.is_dead());
    assert!(Liveness::Alive.is_alive());
}

//! Builds the simulation world from a scenario.
//!
//! Registers templates, then creates tanks, placed entities and scattered
//! scenery with the appropriate components.

use std::f32::consts::TAU;

use glam::Vec3;
use log::info;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::to_radians;
use skirmish_core::Uid;

use crate::context::SimContext;
use crate::entity_manager::EntityManager;
use crate::scenario::{EntityPlacement, Scatter, Scenario, ScenarioError, TankPlacement};

/// Populate `ctx` from `scenario`. Returns the tanks in placement order.
pub fn populate(ctx: &mut SimContext, scenario: &Scenario) -> Result<Vec<Uid>, ScenarioError> {
    ctx.arena = scenario.arena.clone();

    for template in &scenario.templates {
        ctx.entities.register_template(template.clone())?;
    }

    let tanks = scenario
        .tanks
        .iter()
        .map(|placement| spawn_tank(&mut ctx.entities, placement))
        .collect::<Result<Vec<_>, _>>()?;

    for placement in &scenario.entities {
        spawn_entity(&mut ctx.entities, &mut ctx.rng, placement)?;
    }
    for scatter in &scenario.scatter {
        scatter_scenery(&mut ctx.entities, &mut ctx.rng, scatter)?;
    }

    info!(
        "scenario `{}` ready: {} tanks, {} entities",
        scenario.name,
        tanks.len(),
        ctx.entities.len()
    );
    Ok(tanks)
}

pub fn spawn_tank(
    entities: &mut EntityManager,
    placement: &TankPlacement,
) -> Result<Uid, ScenarioError> {
    let rotation = Vec3::new(0.0, to_radians(placement.heading_degrees), 0.0);
    Ok(entities.create_tank(
        &placement.template,
        placement.team,
        placement.name.clone(),
        placement.position,
        rotation,
        placement.patrol.clone(),
    )?)
}

pub fn spawn_entity(
    entities: &mut EntityManager,
    rng: &mut ChaCha8Rng,
    placement: &EntityPlacement,
) -> Result<Uid, ScenarioError> {
    let position = placement.position + jitter(rng, placement.randomise);
    let rotation = Vec3::new(
        to_radians(placement.rotation_degrees.x),
        to_radians(placement.rotation_degrees.y),
        to_radians(placement.rotation_degrees.z),
    );
    Ok(entities.create_entity(
        &placement.template,
        placement.name.clone(),
        position,
        rotation,
        placement.scale,
    )?)
}

/// Scatter `scatter.count` entities on the ground with random headings.
pub fn scatter_scenery(
    entities: &mut EntityManager,
    rng: &mut ChaCha8Rng,
    scatter: &Scatter,
) -> Result<Vec<Uid>, ScenarioError> {
    (0..scatter.count)
        .map(|index| -> Result<Uid, ScenarioError> {
            let position = Vec3::new(
                random_between(rng, scatter.min.x, scatter.max.x),
                0.0,
                random_between(rng, scatter.min.y, scatter.max.y),
            );
            let rotation = Vec3::new(0.0, rng.gen_range(0.0..TAU), 0.0);
            Ok(entities.create_entity(
                &scatter.template,
                format!("{} {index}", scatter.prefix),
                position,
                rotation,
                Vec3::ONE,
            )?)
        })
        .collect()
}

/// Offset of up to half `amount` either way on each axis.
fn jitter(rng: &mut impl Rng, amount: Vec3) -> Vec3 {
    let half = amount.abs() * 0.5;
    Vec3::new(
        random_between(rng, -half.x, half.x),
        random_between(rng, -half.y, half.y),
        random_between(rng, -half.z, half.z),
    )
}

/// Uniform sample that tolerates an empty range.
fn random_between(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

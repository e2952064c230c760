//! Snapshot system: reads the entity table and builds a `SimSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use skirmish_core::enums::TemplateKind;
use skirmish_core::events::SimEvent;
use skirmish_core::state::*;
use skirmish_core::types::SimTime;

use crate::entity_manager::{EntityFilter, EntityManager};

/// Build a complete snapshot from the current table.
pub fn build_snapshot(entities: &EntityManager, time: &SimTime, events: Vec<SimEvent>) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        tanks: build_tanks(entities),
        shells: entities
            .enumerate(EntityFilter::kind(TemplateKind::Shell))
            .count(),
        ammo_crates: build_crates(entities),
        events,
    }
}

fn build_tanks(entities: &EntityManager) -> Vec<TankView> {
    entities
        .tanks()
        .filter_map(|view| {
            let position = view.position()?;
            let tank = view.tank()?;
            Some(TankView {
                uid: view.uid(),
                name: view.name().to_string(),
                template: view.template().name.clone(),
                team: tank.team,
                hp: tank.hp,
                state: tank.state,
                ammunition: tank.ammunition,
                shots_fired: tank.shots_fired,
                position,
            })
        })
        .collect()
}

fn build_crates(entities: &EntityManager) -> Vec<AmmoView> {
    entities
        .enumerate(EntityFilter::kind(TemplateKind::Ammo))
        .filter_map(|view| {
            Some(AmmoView {
                uid: view.uid(),
                position: view.position()?,
            })
        })
        .collect()
}

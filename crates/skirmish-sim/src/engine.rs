//! Simulation engine.
//!
//! `SimulationEngine` owns the simulation context, processes host commands,
//! runs the entity sweep and the ammo drop schedule, and produces
//! `SimSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec3;
use log::{debug, info};

use skirmish_arena::Arena;
use skirmish_core::commands::SimCommand;
use skirmish_core::constants::DT;
use skirmish_core::enums::{MessageKind, TemplateKind};
use skirmish_core::events::Message;
use skirmish_core::state::SimSnapshot;
use skirmish_core::types::SimTime;
use skirmish_core::Uid;

use crate::context::SimContext;
use crate::entity_manager::{EntityFilter, EntityManager};
use crate::scenario::{Scenario, ScenarioError};
use crate::systems;
use crate::systems::ammo_drop::DropSchedule;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f32,
    /// Drop ammo crates at random intervals once the battle starts.
    pub ammo_drops: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            ammo_drops: true,
        }
    }
}

/// The simulation engine. Owns the context and all sim state.
pub struct SimulationEngine {
    ctx: SimContext,
    time: SimTime,
    time_scale: f32,
    ammo_drops: bool,
    command_queue: VecDeque<SimCommand>,
    drop_schedule: DropSchedule,
}

impl SimulationEngine {
    /// Engine with an empty, open arena and no templates.
    pub fn new(config: SimConfig) -> Self {
        Self {
            ctx: SimContext::new(config.seed, Arena::open()),
            time: SimTime::default(),
            time_scale: config.time_scale,
            ammo_drops: config.ammo_drops,
            command_queue: VecDeque::new(),
            drop_schedule: DropSchedule::default(),
        }
    }

    /// Engine populated from `scenario`.
    pub fn with_scenario(config: SimConfig, scenario: &Scenario) -> Result<Self, ScenarioError> {
        let mut engine = Self::new(config);
        world_setup::populate(&mut engine.ctx, scenario)?;
        Ok(engine)
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds (before time scaling) and
    /// return the resulting snapshot.
    pub fn tick(&mut self, dt: f32) -> SimSnapshot {
        self.process_commands();

        let dt = dt * self.time_scale;
        if dt > 0.0 {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.ctx.events);
        systems::snapshot::build_snapshot(&self.ctx.entities, &self.time, events)
    }

    /// Advance by one fixed tick.
    pub fn step(&mut self) -> SimSnapshot {
        self.tick(DT)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn entities(&self) -> &EntityManager {
        &self.ctx.entities
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    /// Direct access for hosts that create entities or send messages
    /// between ticks.
    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.ctx
    }

    pub fn drop_schedule(&self) -> &DropSchedule {
        &self.drop_schedule
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: SimCommand) {
        debug!("command: {command:?}");
        match command {
            SimCommand::StartAll => {
                self.broadcast(MessageKind::Start);
                if self.ammo_drops {
                    self.drop_schedule.arm(&mut self.ctx.rng);
                }
                info!("battle started");
            }
            SimCommand::StopAll => {
                self.broadcast(MessageKind::Stop);
                info!("battle stopped");
            }
            SimCommand::Start { uid } => {
                self.ctx.send(uid, Message::anonymous(MessageKind::Start));
            }
            SimCommand::Stop { uid } => {
                self.ctx.send(uid, Message::anonymous(MessageKind::Stop));
            }
            SimCommand::Relocate { uid, x, z } => self.relocate(uid, x, z),
            SimCommand::SpawnAmmo { x, z } => {
                systems::ammo_drop::drop_crate(&mut self.ctx, x, z);
            }
            SimCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
        }
    }

    /// Send an anonymous message to every tank.
    fn broadcast(&mut self, kind: MessageKind) {
        let tanks: Vec<Uid> = self
            .ctx
            .entities
            .enumerate(EntityFilter::kind(TemplateKind::Tank))
            .map(|view| view.uid())
            .collect();
        for uid in tanks {
            self.ctx.send(uid, Message::anonymous(kind));
        }
    }

    /// Pick a tank up, put it down at (x, z) and set it going.
    fn relocate(&mut self, uid: Uid, x: f32, z: f32) {
        if self.ctx.entities.kind_of(uid) != Some(TemplateKind::Tank) {
            debug!("relocate ignored: {uid} is not a tank");
            return;
        }
        if let Some(transform) = self.ctx.entities.transform_mut(uid) {
            let y = transform.position().y;
            transform.set_position(Vec3::new(x, y, z));
        }
        self.ctx.send(uid, Message::anonymous(MessageKind::Start));
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Entity sweep (tanks, shells, crates, scenery)
        self.ctx.update_all(dt);
        // 2. Ammo drops
        systems::ammo_drop::run(&mut self.ctx, &mut self.drop_schedule, dt);
    }
}

//! Shared simulation state handed to every entity behaviour.

use log::{debug, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_arena::Arena;
use skirmish_core::constants::VIEW_HALF_ANGLE;
use skirmish_core::enums::{Liveness, MessageKind, TemplateKind};
use skirmish_core::events::{Message, SimEvent};
use skirmish_core::Uid;

use crate::entity_manager::EntityManager;
use crate::messenger::Messenger;
use crate::sensing;
use crate::systems;

/// Entity table, mailboxes, RNG and arena. Owned by the engine and passed by
/// `&mut` into each behaviour.
pub struct SimContext {
    pub entities: EntityManager,
    pub messenger: Messenger,
    pub rng: ChaCha8Rng,
    pub arena: Arena,
    /// Events raised since the last snapshot.
    pub events: Vec<SimEvent>,
}

impl SimContext {
    pub fn new(seed: u64, arena: Arena) -> Self {
        Self {
            entities: EntityManager::new(),
            messenger: Messenger::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            arena,
            events: Vec::new(),
        }
    }

    /// Deliver `message` to `to`. Messages for entities that do not exist are
    /// dropped. Returns whether the message was queued.
    pub fn send(&mut self, to: Uid, message: Message) -> bool {
        if !self.entities.contains(to) {
            trace!("dropping {:?} for missing entity {to}", message.kind);
            return false;
        }
        self.messenger.send(to, message);
        true
    }

    /// Update every live entity once, in creation order, then destroy the
    /// ones that asked for it.
    ///
    /// Entities created during the sweep are first updated on the next one.
    pub fn update_all(&mut self, dt: f32) {
        let mut doomed = Vec::new();
        for uid in self.entities.uids() {
            let Some(kind) = self.entities.kind_of(uid) else {
                continue;
            };
            let liveness = match kind {
                TemplateKind::Tank => systems::tank::update(self, uid, dt),
                TemplateKind::Shell => systems::shell::update(self, uid, dt),
                TemplateKind::Ammo => systems::ammo::update(self, uid, dt),
                TemplateKind::Scenery => systems::scenery::update(self, uid, dt),
            };
            if liveness == Liveness::Destroy {
                doomed.push(uid);
            }
        }

        for uid in doomed {
            self.destroy(uid);
        }
    }

    /// Remove an entity and its mailbox.
    pub fn destroy(&mut self, uid: Uid) -> bool {
        self.messenger.discard(uid);
        self.entities.destroy(uid)
    }

    /// Remove every entity and every mailbox. Templates are kept.
    pub fn destroy_all(&mut self) {
        self.messenger.clear();
        self.entities.destroy_all();
    }

    /// Damage tank `uid`, then have every friendly tank that is looking at an
    /// enemy come to help. Returns false if `uid` is not a tank.
    pub fn hit_tank(&mut self, uid: Uid, damage: i32) -> bool {
        let Some((tank, _)) = self.entities.tank_mut(uid) else {
            return false;
        };
        tank.hit(damage);
        let (team, hp) = (tank.team, tank.hp);

        debug!("tank {uid} hit for {damage}, {hp} hp left");
        self.events.push(SimEvent::TankHit {
            tank: uid,
            damage,
            hp,
        });
        self.call_for_help(uid, team);
        true
    }

    /// Send `Help` from `uid` to every live tank of `team` whose turret is on
    /// an enemy.
    pub fn call_for_help(&mut self, uid: Uid, team: u32) {
        let friends: Vec<Uid> = self
            .entities
            .tanks()
            .filter(|view| view.tank().is_some_and(|t| t.team == team && !t.is_dead()))
            .map(|view| view.uid())
            .collect();

        for friend in friends {
            if sensing::look_for_enemy(self, friend, VIEW_HALF_ANGLE) {
                self.send(friend, Message::new(MessageKind::Help, Some(uid)));
            }
        }
    }
}

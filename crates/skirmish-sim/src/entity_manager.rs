//! Entity table: templates, UID allocation, lookup and enumeration.
//!
//! Component data lives in a hecs `World`. The manager keeps a UID index on
//! top of it (ordered, so enumeration follows creation order) together with
//! each entity's identity, and the template store shared by all entities.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use glam::Vec3;
use hecs::{Entity, EntityRef, Ref, World};

use skirmish_core::components::*;
use skirmish_core::constants::{DEFAULT_PATROL_OFFSET, TANK_TURRET_PART};
use skirmish_core::enums::{TankState, TemplateKind};
use skirmish_core::{SkirmishError, Transform, Uid};

/// Selects entities during enumeration. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityFilter {
    pub name: Option<String>,
    pub template: Option<String>,
    pub kind: Option<TemplateKind>,
}

impl EntityFilter {
    /// Match every entity.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match entities built from templates of `kind`.
    pub fn kind(kind: TemplateKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Match entities built from the template called `template`.
    pub fn template(template: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_kind(mut self, kind: TemplateKind) -> Self {
        self.kind = Some(kind);
        self
    }

    fn matches(&self, info: &EntityInfo) -> bool {
        self.name.as_deref().map_or(true, |name| info.name == name)
            && self
                .template
                .as_deref()
                .map_or(true, |template| info.template.name == template)
            && self.kind.map_or(true, |kind| info.template.kind == kind)
    }
}

/// Read-only handle on one live entity.
///
/// Component accessors borrow through hecs; drop the returned guards before
/// mutating the same entity.
pub struct EntityView<'a> {
    info: &'a EntityInfo,
    entity: EntityRef<'a>,
}

impl<'a> EntityView<'a> {
    pub fn uid(&self) -> Uid {
        self.info.uid
    }

    pub fn name(&self) -> &'a str {
        &self.info.name
    }

    pub fn template(&self) -> &'a Arc<EntityTemplate> {
        &self.info.template
    }

    pub fn kind(&self) -> TemplateKind {
        self.info.template.kind
    }

    pub fn transform(&self) -> Option<Ref<'a, Transform>> {
        self.entity.get::<&Transform>()
    }

    pub fn position(&self) -> Option<Vec3> {
        self.transform().map(|t| t.position())
    }

    pub fn tank(&self) -> Option<Ref<'a, Tank>> {
        self.entity.get::<&Tank>()
    }

    pub fn shell(&self) -> Option<Ref<'a, Shell>> {
        self.entity.get::<&Shell>()
    }

    /// Team of a tank or shell.
    pub fn team(&self) -> Option<u32> {
        self.tank()
            .map(|t| t.team)
            .or_else(|| self.shell().map(|s| s.team))
    }

    pub fn tank_state(&self) -> Option<TankState> {
        self.tank().map(|t| t.state)
    }
}

struct Slot {
    entity: Entity,
    info: EntityInfo,
}

/// Owns every live entity and every registered template.
#[derive(Default)]
pub struct EntityManager {
    world: World,
    index: BTreeMap<Uid, Slot>,
    templates: HashMap<String, Arc<EntityTemplate>>,
    next_uid: u32,
}

impl EntityManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- Templates ----

    /// Register a template. Names are unique; tank templates must carry stats.
    pub fn register_template(
        &mut self,
        template: EntityTemplate,
    ) -> Result<Arc<EntityTemplate>, SkirmishError> {
        if self.templates.contains_key(&template.name) {
            return Err(SkirmishError::DuplicateTemplate(template.name));
        }
        if template.kind == TemplateKind::Tank && template.tank.is_none() {
            return Err(SkirmishError::MissingTankStats(template.name));
        }
        let template = Arc::new(template);
        self.templates
            .insert(template.name.clone(), Arc::clone(&template));
        Ok(template)
    }

    pub fn template(&self, name: &str) -> Option<&Arc<EntityTemplate>> {
        self.templates.get(name)
    }

    fn template_of_kind(
        &self,
        name: &str,
        expected: TemplateKind,
    ) -> Result<Arc<EntityTemplate>, SkirmishError> {
        let template = self
            .template(name)
            .ok_or_else(|| SkirmishError::UnknownTemplate(name.to_string()))?;
        if template.kind != expected {
            return Err(SkirmishError::WrongTemplateKind {
                name: name.to_string(),
                expected,
                actual: template.kind,
            });
        }
        Ok(Arc::clone(template))
    }

    // ---- Factories ----

    /// Create a scenery entity or an ammo crate from a template.
    ///
    /// Tanks and shells need instance data; use `create_tank` or
    /// `create_shell` for those.
    pub fn create_entity(
        &mut self,
        template: &str,
        name: impl Into<String>,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> Result<Uid, SkirmishError> {
        let template = self
            .template(template)
            .cloned()
            .ok_or_else(|| SkirmishError::UnknownTemplate(template.to_string()))?;
        let transform = Transform::new(position, rotation, scale, 0);
        match template.kind {
            TemplateKind::Scenery => Ok(self.spawn(template, name.into(), (transform, Scenery))),
            TemplateKind::Ammo => Ok(self.spawn(template, name.into(), (transform, AmmoCrate))),
            actual => Err(SkirmishError::WrongTemplateKind {
                name: template.name.clone(),
                expected: TemplateKind::Scenery,
                actual,
            }),
        }
    }

    /// Create a tank. An empty `patrol_route` gets the default route: two
    /// points ahead of and behind the spawn position along world Z.
    pub fn create_tank(
        &mut self,
        template: &str,
        team: u32,
        name: impl Into<String>,
        position: Vec3,
        rotation: Vec3,
        patrol_route: Vec<Vec3>,
    ) -> Result<Uid, SkirmishError> {
        let template = self.template_of_kind(template, TemplateKind::Tank)?;
        let stats = template
            .tank
            .ok_or_else(|| SkirmishError::MissingTankStats(template.name.clone()))?;

        let patrol_route = if patrol_route.is_empty() {
            let offset = Vec3::new(0.0, 0.0, DEFAULT_PATROL_OFFSET);
            vec![position + offset, position - offset]
        } else {
            patrol_route
        };

        let transform = Transform::new(position, rotation, Vec3::ONE, TANK_TURRET_PART);
        let tank = Tank::new(team, &stats, patrol_route);
        Ok(self.spawn(template, name.into(), (transform, tank)))
    }

    /// Create a shell travelling along the local Z axis of `rotation`.
    pub fn create_shell(
        &mut self,
        template: &str,
        position: Vec3,
        rotation: Vec3,
        team: u32,
        damage: i32,
    ) -> Result<Uid, SkirmishError> {
        let template = self.template_of_kind(template, TemplateKind::Shell)?;
        let transform = Transform::new(position, rotation, Vec3::ONE, 0);
        let name = template.name.clone();
        Ok(self.spawn(template, name, (transform, Shell::new(team, damage))))
    }

    /// Create an ammo crate at `position` with a uniform `scale`.
    pub fn create_ammo(
        &mut self,
        template: &str,
        position: Vec3,
        scale: f32,
    ) -> Result<Uid, SkirmishError> {
        let template = self.template_of_kind(template, TemplateKind::Ammo)?;
        let transform = Transform::new(position, Vec3::ZERO, Vec3::splat(scale), 0);
        let name = template.name.clone();
        Ok(self.spawn(template, name, (transform, AmmoCrate)))
    }

    fn spawn(
        &mut self,
        template: Arc<EntityTemplate>,
        name: String,
        components: impl hecs::DynamicBundle,
    ) -> Uid {
        self.next_uid += 1;
        let uid = Uid(self.next_uid);
        let entity = self.world.spawn(components);
        self.index.insert(
            uid,
            Slot {
                entity,
                info: EntityInfo {
                    uid,
                    name,
                    template,
                },
            },
        );
        uid
    }

    // ---- Lookup ----

    pub fn get(&self, uid: Uid) -> Option<EntityView<'_>> {
        let slot = self.index.get(&uid)?;
        self.view(slot)
    }

    pub fn contains(&self, uid: Uid) -> bool {
        self.index.contains_key(&uid)
    }

    pub fn kind_of(&self, uid: Uid) -> Option<TemplateKind> {
        self.index.get(&uid).map(|slot| slot.info.template.kind)
    }

    /// Live entities matching `filter`, in creation order.
    ///
    /// The iterator borrows the manager, so the table cannot change while an
    /// enumeration is in progress.
    pub fn enumerate(&self, filter: EntityFilter) -> impl Iterator<Item = EntityView<'_>> + '_ {
        self.index
            .values()
            .filter(move |slot| filter.matches(&slot.info))
            .filter_map(move |slot| self.view(slot))
    }

    /// Every live tank, in creation order.
    pub fn tanks(&self) -> impl Iterator<Item = EntityView<'_>> + '_ {
        self.enumerate(EntityFilter::kind(TemplateKind::Tank))
    }

    /// UIDs of all live entities in creation order.
    pub fn uids(&self) -> Vec<Uid> {
        self.index.keys().copied().collect()
    }

    fn view<'a>(&'a self, slot: &'a Slot) -> Option<EntityView<'a>> {
        let entity = self.world.entity(slot.entity).ok()?;
        Some(EntityView {
            info: &slot.info,
            entity,
        })
    }

    // ---- Mutation ----

    pub fn tank_mut(&mut self, uid: Uid) -> Option<(&mut Tank, &mut Transform)> {
        let entity = self.index.get(&uid)?.entity;
        self.world
            .query_one_mut::<(&mut Tank, &mut Transform)>(entity)
            .ok()
    }

    pub fn shell_mut(&mut self, uid: Uid) -> Option<(&mut Shell, &mut Transform)> {
        let entity = self.index.get(&uid)?.entity;
        self.world
            .query_one_mut::<(&mut Shell, &mut Transform)>(entity)
            .ok()
    }

    pub fn transform_mut(&mut self, uid: Uid) -> Option<&mut Transform> {
        let entity = self.index.get(&uid)?.entity;
        self.world.query_one_mut::<&mut Transform>(entity).ok()
    }

    /// Remove an entity. Returns false if it was already gone.
    pub fn destroy(&mut self, uid: Uid) -> bool {
        match self.index.remove(&uid) {
            Some(slot) => {
                let _ = self.world.despawn(slot.entity);
                true
            }
            None => false,
        }
    }

    /// Remove every entity. Templates and the UID counter are kept.
    pub fn destroy_all(&mut self) {
        self.index.clear();
        self.world.clear();
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

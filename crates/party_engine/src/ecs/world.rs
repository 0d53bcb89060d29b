//! ECS World implementation

use std::collections::HashSet;

use thiserror::Error;

use super::entity::{Entity, EntityId};
use super::system::{System, TickContext, Viewport};

/// World-level contract violations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldError {
    /// The entity was removed earlier; removal is permanent
    #[error("Entity {0} was removed from the world and cannot be re-admitted")]
    Retired(EntityId),
}

/// Ordered entity collection owned by the [`World`]
///
/// Insertion order is iteration order, which is also draw order.
#[derive(Debug, Default)]
pub struct Entities {
    list: Vec<Entity>,
    retired: HashSet<EntityId>,
}

impl Entities {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity
    pub fn push(&mut self, entity: Entity) -> Result<EntityId, WorldError> {
        let id = entity.id();
        if self.retired.contains(&id) {
            return Err(WorldError::Retired(id));
        }
        self.list.push(entity);
        Ok(id)
    }

    /// Remove an entity by identity, preserving the order of the rest
    ///
    /// Only an identity that was actually removed is retired; asking for one
    /// that is not present changes nothing.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.list.iter().position(|entity| entity.id() == id)?;
        self.retired.insert(id);
        Some(self.list.remove(index))
    }

    /// Remove every entity matching `predicate`, returning how many went
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&Entity) -> bool) -> usize {
        let before = self.list.len();
        let retired = &mut self.retired;
        self.list.retain(|entity| {
            if predicate(entity) {
                retired.insert(entity.id());
                false
            } else {
                true
            }
        });
        before - self.list.len()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.list.iter()
    }

    /// Iterate mutably in insertion order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.list.iter_mut()
    }

    /// Read-only view of the collection
    pub fn as_slice(&self) -> &[Entity] {
        &self.list
    }

    /// Look up an entity by identity
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.list.iter().find(|entity| entity.id() == id)
    }

    /// Look up an entity mutably by identity
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.list.iter_mut().find(|entity| entity.id() == id)
    }

    /// Whether the identity is currently in the collection
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Whether the identity has been removed at some point
    pub fn is_retired(&self, id: EntityId) -> bool {
        self.retired.contains(&id)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether there are no live entities
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<'a> IntoIterator for &'a Entities {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Entities {
    type Item = &'a mut Entity;
    type IntoIter = std::slice::IterMut<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// ECS World containing all entities and the ordered simulation systems
pub struct World {
    entities: Entities,
    systems: Vec<Box<dyn System>>,
    viewport: Viewport,
    tick_count: u64,
}

impl World {
    /// Create a new world for a stage of the given size
    pub fn new(viewport: Viewport) -> Self {
        Self {
            entities: Entities::new(),
            systems: Vec::new(),
            viewport,
            tick_count: 0,
        }
    }

    /// Admit an entity at the end of the collection
    pub fn add_entity(&mut self, entity: Entity) -> Result<EntityId, WorldError> {
        let id = self.entities.push(entity)?;
        log::debug!("Entity {} admitted ({} live)", id, self.entities.len());
        Ok(id)
    }

    /// Remove an entity by identity; it can never be admitted again
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let removed = self.entities.remove(id);
        if removed.is_some() {
            log::debug!("Entity {} removed ({} live)", id, self.entities.len());
        }
        removed
    }

    /// Append a system; registration order is execution order
    pub fn add_system(&mut self, system: impl System + 'static) {
        log::info!("Registered system {} at position {}", system.name(), self.systems.len());
        self.systems.push(Box::new(system));
    }

    /// Run every registered system once, in registration order
    ///
    /// Each system sees every change made by the systems before it in the
    /// same tick, including removals.
    pub fn tick(&mut self, timestamp: f64) {
        let ctx = TickContext {
            timestamp,
            tick: self.tick_count,
            viewport: self.viewport,
        };
        for system in &mut self.systems {
            system.update(&mut self.entities, &ctx);
        }
        self.tick_count += 1;
    }

    /// Update the stage size used by future ticks
    ///
    /// Entities are not moved here; the reposition system picks up any that
    /// ended up outside on its next pass.
    pub fn resize(&mut self, width: f32, height: f32) {
        log::info!("Viewport resized to {}x{}", width, height);
        self.viewport = Viewport::new(width, height);
    }

    /// Read-only view of the entity collection
    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    /// Mutable access for out-of-tick collaborators such as input handling
    pub fn entities_mut(&mut self) -> &mut Entities {
        &mut self.entities
    }

    /// Look up an entity by identity
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Look up an entity mutably by identity
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Current stage dimensions
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Names of the registered systems in execution order
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether there are no live entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

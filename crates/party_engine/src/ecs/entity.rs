//! Entity implementation

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::component::{AnyComponent, Component, ComponentKind, ComponentMask};

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque entity identity
///
/// Allocated from a process-wide counter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An identity plus at most one component per kind
///
/// Deliberately not `Clone`: a copy would share the identity.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    mask: ComponentMask,
    slots: [Option<AnyComponent>; ComponentKind::COUNT],
}

impl Entity {
    /// Create an empty entity with a fresh identity
    pub fn new() -> Self {
        Self {
            id: EntityId::next(),
            mask: ComponentMask::empty(),
            slots: [None; ComponentKind::COUNT],
        }
    }

    /// Builder form of [`add_component`](Self::add_component)
    #[must_use]
    pub fn with<C: Component>(mut self, component: C) -> Self {
        self.add_component(component);
        self
    }

    /// Get the entity ID
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Kinds currently attached
    pub fn mask(&self) -> ComponentMask {
        self.mask
    }

    /// Attach a component
    ///
    /// Attaching a kind that is already present replaces the old instance,
    /// which is returned. Callers are expected not to do this; it is logged.
    pub fn add_component<C: Component>(&mut self, component: C) -> Option<C> {
        self.insert_any(component.into())
            .and_then(|previous| C::downcast(&previous).copied())
    }

    /// Attach an already tagged component
    pub fn insert_any(&mut self, component: AnyComponent) -> Option<AnyComponent> {
        let kind = component.kind();
        let previous = self.slots[kind.index()].replace(component);
        if previous.is_some() {
            log::warn!("Entity {} already had a {} component, replacing it", self.id, kind);
        }
        self.mask.insert(kind.mask());
        previous
    }

    /// Get a component by type
    pub fn get<C: Component>(&self) -> Option<&C> {
        self.slots[C::KIND.index()].as_ref().and_then(C::downcast)
    }

    /// Get a mutable component by type
    pub fn get_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.slots[C::KIND.index()].as_mut().and_then(C::downcast_mut)
    }

    /// Get a component by kind
    pub fn component(&self, kind: ComponentKind) -> Option<&AnyComponent> {
        self.slots[kind.index()].as_ref()
    }

    /// Whether a component of type `C` is attached
    pub fn has<C: Component>(&self) -> bool {
        self.mask.contains(C::KIND.mask())
    }

    /// Whether every kind in `mask` is attached
    pub fn has_all(&self, mask: ComponentMask) -> bool {
        self.mask.contains(mask)
    }

    /// Attached components in slot order
    pub fn components(&self) -> impl Iterator<Item = &AnyComponent> {
        self.slots.iter().flatten()
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

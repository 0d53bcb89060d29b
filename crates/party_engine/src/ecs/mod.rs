//! Entity-Component-System implementation
//!
//! Entities are identities carrying at most one component per kind;
//! systems are behaviour passes run by the [`World`] in registration order.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;
pub mod system;
pub mod systems;

#[cfg(test)]
mod tests;

pub use world::{Entities, World, WorldError};
pub use entity::{Entity, EntityId};
pub use component::{AnyComponent, Component, ComponentKind, ComponentMask};
pub use system::{System, TickContext, Viewport};

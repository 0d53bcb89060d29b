//! Pointer hit-testing and activation
//!
//! Runs on pointer events, outside the fixed-timestep tick. Activation only
//! ever sets [`Selectable::selected`]; the selection system takes it from
//! there on the next tick.

use serde::{Deserialize, Serialize};

use crate::ecs::components::{Bounds, Position, Selectable};
use crate::ecs::{Entities, Entity, EntityId};
use crate::foundation::math::Vec2;

/// Which hit entities an activation selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitPolicy {
    /// Every hit entity with an unselected [`Selectable`]
    #[default]
    All,
    /// Only the first such entity in collection order
    First,
}

/// Whether `point` lies inside the entity's box, half-open on the far edges
///
/// Entities without Position or Bounds are never hit.
pub fn hit_test(entity: &Entity, point: Vec2) -> bool {
    match (entity.get::<Position>(), entity.get::<Bounds>()) {
        (Some(position), Some(bounds)) => bounds.rect_at(position).contains(point),
        _ => false,
    }
}

/// Entities under `point`, in collection order
pub fn entities_at(entities: &Entities, point: Vec2) -> impl Iterator<Item = EntityId> + '_ {
    entities
        .iter()
        .filter(move |entity| hit_test(entity, point))
        .map(Entity::id)
}

/// Pointer state and activation policy
#[derive(Debug, Clone)]
pub struct Picker {
    policy: HitPolicy,
    /// Last pointer position in viewport coordinates
    pointer: Vec2,
    activations: u64,
}

impl Picker {
    /// Create a picker with the given policy
    pub fn new(policy: HitPolicy) -> Self {
        Self {
            policy,
            pointer: Vec2::zeros(),
            activations: 0,
        }
    }

    /// Current policy
    pub fn policy(&self) -> HitPolicy {
        self.policy
    }

    /// Last known pointer position
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Number of activation events handled
    pub fn activations(&self) -> u64 {
        self.activations
    }

    /// Track pointer movement
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Handle an activation (click/tap) at viewport coordinates
    ///
    /// Returns the entities whose selection flag changed. Entities that are
    /// already selected are hit but not toggled.
    pub fn activate(&mut self, entities: &mut Entities, x: f32, y: f32) -> Vec<EntityId> {
        self.on_pointer_move(x, y);
        self.activations += 1;

        let point = self.pointer;
        let mut newly_selected = Vec::new();
        for entity in entities.iter_mut() {
            if !hit_test(entity, point) {
                continue;
            }
            let id = entity.id();
            let Some(selectable) = entity.get_mut::<Selectable>() else {
                continue;
            };
            if !selectable.select() {
                continue;
            }
            log::debug!("Pointer at ({:.1}, {:.1}) selected entity {}", x, y, id);
            newly_selected.push(id);
            if self.policy == HitPolicy::First {
                break;
            }
        }
        newly_selected
    }
}

impl Default for Picker {
    fn default() -> Self {
        Self::new(HitPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(entities: &mut Entities, x: f32, y: f32) -> EntityId {
        entities
            .push(
                Entity::new()
                    .with(Position::new(x, y))
                    .with(Bounds::new(64.0, 64.0))
                    .with(Selectable::default()),
            )
            .unwrap()
    }

    fn selected(entities: &Entities, id: EntityId) -> bool {
        entities.get(id).unwrap().get::<Selectable>().unwrap().selected
    }

    #[test]
    fn test_activation_selects_hit_entity() {
        let mut entities = Entities::new();
        let id = target(&mut entities, 0.0, 0.0);
        let mut picker = Picker::default();

        assert_eq!(picker.activate(&mut entities, 10.0, 10.0), vec![id]);
        assert!(selected(&entities, id));
    }

    #[test]
    fn test_second_activation_does_not_toggle_off() {
        let mut entities = Entities::new();
        let id = target(&mut entities, 0.0, 0.0);
        let mut picker = Picker::default();

        picker.activate(&mut entities, 10.0, 10.0);
        assert!(picker.activate(&mut entities, 10.0, 10.0).is_empty());
        assert!(selected(&entities, id));
        assert_eq!(picker.activations(), 2);
    }

    #[test]
    fn test_hit_box_is_half_open() {
        let mut entities = Entities::new();
        let id = target(&mut entities, 0.0, 0.0);
        let entity = entities.get(id).unwrap();

        assert!(hit_test(entity, Vec2::new(0.0, 0.0)));
        assert!(hit_test(entity, Vec2::new(63.5, 63.5)));
        assert!(!hit_test(entity, Vec2::new(64.0, 0.0)));
        assert!(!hit_test(entity, Vec2::new(0.0, 64.0)));
    }

    #[test]
    fn test_miss_selects_nothing() {
        let mut entities = Entities::new();
        let id = target(&mut entities, 0.0, 0.0);

        assert!(Picker::default().activate(&mut entities, 80.0, 80.0).is_empty());
        assert!(!selected(&entities, id));
    }

    #[test]
    fn test_policy_all_selects_every_overlap() {
        let mut entities = Entities::new();
        let a = target(&mut entities, 0.0, 0.0);
        let b = target(&mut entities, 32.0, 32.0);

        let hits = Picker::new(HitPolicy::All).activate(&mut entities, 40.0, 40.0);

        assert_eq!(hits, vec![a, b]);
    }

    #[test]
    fn test_policy_first_skips_already_selected() {
        let mut entities = Entities::new();
        let a = target(&mut entities, 0.0, 0.0);
        let b = target(&mut entities, 32.0, 32.0);
        let mut picker = Picker::new(HitPolicy::First);

        assert_eq!(picker.activate(&mut entities, 40.0, 40.0), vec![a]);
        assert!(!selected(&entities, b));
        assert_eq!(picker.activate(&mut entities, 40.0, 40.0), vec![b]);
    }

    #[test]
    fn test_entities_at_lists_hits_in_order() {
        let mut entities = Entities::new();
        let a = target(&mut entities, 0.0, 0.0);
        target(&mut entities, 100.0, 100.0);
        let c = target(&mut entities, 10.0, 10.0);

        let hits: Vec<_> = entities_at(&entities, Vec2::new(20.0, 20.0)).collect();
        assert_eq!(hits, vec![a, c]);
    }
}

//! Converts pointer selection into pending deletion

use crate::ecs::components::{Deletable, Selectable};
use crate::ecs::{ComponentMask, Entities, System, TickContext};

/// Turns every selected entity into a deleted one
///
/// `selected` is cleared and `deleted` set in the same pass, so an entity is
/// never left selected. The transition is one way.
#[derive(Debug, Default)]
pub struct SelectionSystem;

impl SelectionSystem {
    const REQUIRED: ComponentMask = ComponentMask::SELECTABLE.union(ComponentMask::DELETABLE);

    /// Create a new selection system
    pub fn new() -> Self {
        Self
    }
}

impl System for SelectionSystem {
    fn name(&self) -> &str {
        "SelectionSystem"
    }

    fn update(&mut self, entities: &mut Entities, _ctx: &TickContext) {
        for entity in entities {
            if !entity.has_all(Self::REQUIRED) {
                continue;
            }
            let id = entity.id();
            let Some(selectable) = entity.get_mut::<Selectable>() else {
                continue;
            };
            if !selectable.selected {
                continue;
            }
            selectable.selected = false;
            if let Some(deletable) = entity.get_mut::<Deletable>() {
                deletable.mark();
                log::debug!("Entity {} selected, flagged for deletion", id);
            }
        }
    }
}

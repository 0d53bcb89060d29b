//! Removes entities flagged for deletion

use crate::ecs::components::Deletable;
use crate::ecs::{Entities, System, TickContext};

/// Removes every entity whose [`Deletable::deleted`] is set
///
/// Register after [`SelectionSystem`](super::SelectionSystem) so a selection
/// is removed in the same tick it is converted.
#[derive(Debug, Default)]
pub struct DeleteSystem {
    removed_total: usize,
}

impl DeleteSystem {
    /// Create a new delete system
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities removed since creation
    pub fn removed_total(&self) -> usize {
        self.removed_total
    }
}

impl System for DeleteSystem {
    fn name(&self) -> &str {
        "DeleteSystem"
    }

    fn update(&mut self, entities: &mut Entities, ctx: &TickContext) {
        let removed = entities.remove_where(|entity| {
            entity.get::<Deletable>().is_some_and(|deletable| deletable.deleted)
        });
        if removed > 0 {
            self.removed_total += removed;
            log::debug!(
                "Tick {}: removed {} entities ({} live)",
                ctx.tick,
                removed,
                entities.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Entity, Viewport};

    #[test]
    fn test_only_flagged_entities_are_removed() {
        let mut entities = Entities::new();
        let keep = entities.push(Entity::new().with(Deletable::default())).unwrap();
        let gone = entities.push(Entity::new().with(Deletable { deleted: true })).unwrap();
        let plain = entities.push(Entity::new()).unwrap();
        let ctx = TickContext {
            timestamp: 0.0,
            tick: 0,
            viewport: Viewport::new(10.0, 10.0),
        };

        let mut system = DeleteSystem::new();
        system.update(&mut entities, &ctx);

        assert!(entities.contains(keep));
        assert!(entities.contains(plain));
        assert!(!entities.contains(gone));
        assert!(entities.is_retired(gone));
        assert_eq!(system.removed_total(), 1);
    }
}

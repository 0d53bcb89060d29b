//! Relocates entities that drifted past the viewport's far edges

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::RepositionConfig;
use crate::ecs::components::{Bounds, Position};
use crate::ecs::{ComponentMask, Entities, System, TickContext, Viewport};

/// Moves a [`Repositionable`](crate::ecs::components::Repositionable) entity to
/// a random spot when its far edge, minus an inset, exceeds the viewport
///
/// Only the right and bottom edges are checked. An entity hanging off the
/// left or top is left where it is.
#[derive(Debug)]
pub struct RepositionSystem<R: Rng = StdRng> {
    inset: f32,
    rng: R,
    relocated_total: usize,
}

impl RepositionSystem<StdRng> {
    /// Create a reposition system with an entropy-seeded generator
    pub fn new(config: RepositionConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a reposition system with a reproducible generator
    pub fn seeded(config: RepositionConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RepositionSystem<R> {
    const REQUIRED: ComponentMask = ComponentMask::REPOSITIONABLE
        .union(ComponentMask::POSITION)
        .union(ComponentMask::BOUNDS);

    /// Create a reposition system drawing from `rng`
    pub fn with_rng(config: RepositionConfig, rng: R) -> Self {
        Self {
            inset: config.inset,
            rng,
            relocated_total: 0,
        }
    }

    /// Entities relocated since creation
    pub fn relocated_total(&self) -> usize {
        self.relocated_total
    }

    /// Whether the far edge (less the inset) lies beyond the viewport
    pub fn is_out_of_bounds(&self, position: &Position, bounds: &Bounds, viewport: Viewport) -> bool {
        position.x() + bounds.width - self.inset > viewport.width
            || position.y() + bounds.height - self.inset > viewport.height
    }

    /// Uniform position in `[0, width - bounds.width) × [0, height - bounds.height)`
    pub fn sample_position(&mut self, bounds: &Bounds, viewport: Viewport) -> Position {
        let x = self.rng.gen::<f32>() * (viewport.width - bounds.width);
        let y = self.rng.gen::<f32>() * (viewport.height - bounds.height);
        Position::new(x, y)
    }
}

impl<R: Rng> System for RepositionSystem<R> {
    fn name(&self) -> &str {
        "RepositionSystem"
    }

    fn update(&mut self, entities: &mut Entities, ctx: &TickContext) {
        for entity in entities {
            if !entity.has_all(Self::REQUIRED) {
                continue;
            }
            let (Some(position), Some(bounds)) =
                (entity.get::<Position>().copied(), entity.get::<Bounds>().copied())
            else {
                continue;
            };
            if !self.is_out_of_bounds(&position, &bounds, ctx.viewport) {
                continue;
            }
            let relocated = self.sample_position(&bounds, ctx.viewport);
            log::debug!(
                "Entity {} out of bounds at ({:.1}, {:.1}), moved to ({:.1}, {:.1})",
                entity.id(),
                position.x(),
                position.y(),
                relocated.x(),
                relocated.y()
            );
            if let Some(slot) = entity.get_mut::<Position>() {
                *slot = relocated;
            }
            self.relocated_total += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Repositionable;
    use crate::ecs::{Entity, EntityId};

    const STAGE: Viewport = Viewport { width: 200.0, height: 100.0 };

    fn ctx(viewport: Viewport) -> TickContext {
        TickContext {
            timestamp: 0.0,
            tick: 0,
            viewport,
        }
    }

    fn spawn(entities: &mut Entities, x: f32, y: f32) -> EntityId {
        entities
            .push(
                Entity::new()
                    .with(Repositionable)
                    .with(Position::new(x, y))
                    .with(Bounds::new(64.0, 64.0)),
            )
            .unwrap()
    }

    fn position(entities: &Entities, id: EntityId) -> Position {
        *entities.get(id).unwrap().get::<Position>().unwrap()
    }

    #[test]
    fn test_inside_entities_never_move() {
        let mut entities = Entities::new();
        let ids = [
            spawn(&mut entities, 0.0, 0.0),
            spawn(&mut entities, 136.0, 36.0),
            spawn(&mut entities, 50.0, 20.0),
        ];
        let mut system = RepositionSystem::seeded(RepositionConfig::default(), 7);

        for _ in 0..10 {
            system.update(&mut entities, &ctx(STAGE));
        }

        assert_eq!(position(&entities, ids[0]), Position::new(0.0, 0.0));
        assert_eq!(position(&entities, ids[1]), Position::new(136.0, 36.0));
        assert_eq!(position(&entities, ids[2]), Position::new(50.0, 20.0));
        assert_eq!(system.relocated_total(), 0);
    }

    #[test]
    fn test_inset_tolerates_small_overhang() {
        let mut entities = Entities::new();
        // Far edge at 203, inset 4 brings it to 199
        let id = spawn(&mut entities, 139.0, 0.0);
        let mut system = RepositionSystem::seeded(RepositionConfig::default(), 1);

        system.update(&mut entities, &ctx(STAGE));

        assert_eq!(position(&entities, id), Position::new(139.0, 0.0));
    }

    #[test]
    fn test_out_of_bounds_is_relocated_inside() {
        let mut system = RepositionSystem::seeded(RepositionConfig::default(), 42);
        for _ in 0..50 {
            let mut entities = Entities::new();
            let id = spawn(&mut entities, 500.0, 500.0);

            system.update(&mut entities, &ctx(STAGE));

            let moved = position(&entities, id);
            assert!(moved.x() >= 0.0 && moved.x() < 136.0);
            assert!(moved.y() >= 0.0 && moved.y() < 36.0);
        }
        assert_eq!(system.relocated_total(), 50);
    }

    #[test]
    fn test_near_edges_are_not_checked() {
        let mut entities = Entities::new();
        let id = spawn(&mut entities, -300.0, -300.0);
        let mut system = RepositionSystem::seeded(RepositionConfig::default(), 3);

        system.update(&mut entities, &ctx(STAGE));

        assert_eq!(position(&entities, id), Position::new(-300.0, -300.0));
    }

    #[test]
    fn test_shrunk_viewport_triggers_relocation() {
        let mut entities = Entities::new();
        let id = spawn(&mut entities, 120.0, 10.0);
        let mut system = RepositionSystem::seeded(RepositionConfig::default(), 9);

        system.update(&mut entities, &ctx(STAGE));
        assert_eq!(position(&entities, id), Position::new(120.0, 10.0));

        let small = Viewport::new(150.0, 100.0);
        system.update(&mut entities, &ctx(small));
        assert!(position(&entities, id).x() < 150.0 - 64.0);
    }

    #[test]
    fn test_without_marker_nothing_moves() {
        let mut entities = Entities::new();
        let id = entities
            .push(Entity::new().with(Position::new(900.0, 900.0)).with(Bounds::new(64.0, 64.0)))
            .unwrap();
        let mut system = RepositionSystem::seeded(RepositionConfig::default(), 5);

        system.update(&mut entities, &ctx(STAGE));

        assert_eq!(position(&entities, id), Position::new(900.0, 900.0));
    }
}

//! Reflect velocity at the stage edges

use crate::ecs::components::{Bounds, Position, Velocity};
use crate::ecs::{ComponentMask, Entities, System, TickContext, Viewport};

/// Negates a velocity axis when the entity's box crosses that axis' edges
///
/// Each axis is tested on its own, so a corner hit flips both in one tick.
/// Only the sign changes; magnitude is preserved. Entities need Position,
/// Velocity and Bounds; anything less is skipped.
#[derive(Debug, Default)]
pub struct BounceSystem;

impl BounceSystem {
    const REQUIRED: ComponentMask = ComponentMask::POSITION
        .union(ComponentMask::VELOCITY)
        .union(ComponentMask::BOUNDS);

    /// Create a new bounce system
    pub fn new() -> Self {
        Self
    }

    /// Apply the edge test for one entity
    pub fn reflect(position: &Position, bounds: &Bounds, velocity: &mut Velocity, viewport: Viewport) {
        if position.x() < 0.0 || position.x() + bounds.width > viewport.width {
            velocity.0.x = -velocity.0.x;
        }
        if position.y() < 0.0 || position.y() + bounds.height > viewport.height {
            velocity.0.y = -velocity.0.y;
        }
    }
}

impl System for BounceSystem {
    fn name(&self) -> &str {
        "BounceSystem"
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
            if let Some(velocity) = entity.get_mut::<Velocity>() {
                Self::reflect(&position, &bounds, velocity, ctx.viewport);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGE: Viewport = Viewport { width: 100.0, height: 100.0 };

    fn bounce(position: Position, velocity: Velocity) -> Velocity {
        let mut velocity = velocity;
        BounceSystem::reflect(&position, &Bounds::new(64.0, 64.0), &mut velocity, STAGE);
        velocity
    }

    #[test]
    fn test_inside_keeps_velocity() {
        let v = bounce(Position::new(10.0, 10.0), Velocity::new(2.0, -1.5));
        assert_eq!(v, Velocity::new(2.0, -1.5));
    }

    #[test]
    fn test_far_edge_flips_x_only() {
        let v = bounce(Position::new(38.0, 10.0), Velocity::new(2.0, 2.0));
        assert_eq!(v, Velocity::new(-2.0, 2.0));
    }

    #[test]
    fn test_near_edge_flips_y_only() {
        let v = bounce(Position::new(10.0, -0.5), Velocity::new(1.0, -1.0));
        assert_eq!(v, Velocity::new(1.0, 1.0));
    }

    #[test]
    fn test_corner_flips_both_axes() {
        let v = bounce(Position::new(-1.0, 40.0), Velocity::new(-0.7, 1.3));
        assert_eq!(v, Velocity::new(0.7, -1.3));
    }

    #[test]
    fn test_exactly_touching_far_edge_does_not_flip() {
        let v = bounce(Position::new(36.0, 36.0), Velocity::new(2.0, 2.0));
        assert_eq!(v, Velocity::new(2.0, 2.0));
    }

    #[test]
    fn test_magnitude_is_preserved() {
        let positions = [(-5.0, -5.0), (50.0, 50.0), (0.0, 37.0), (99.0, 1.0)];
        for (x, y) in positions {
            let before = Velocity::new(1.5, -0.75);
            let after = bounce(Position::new(x, y), before);
            assert_eq!(after.x().abs(), before.x().abs());
            assert_eq!(after.y().abs(), before.y().abs());
        }
    }
}

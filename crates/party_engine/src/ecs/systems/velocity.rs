//! Velocity integration

use crate::ecs::components::{Position, Velocity};
use crate::ecs::{Entities, System, TickContext};

/// Adds [`Velocity`] to [`Position`] once per tick
///
/// No clamping and no time scaling: velocity is a per-tick displacement.
#[derive(Debug, Default)]
pub struct VelocitySystem;

impl VelocitySystem {
    /// Create a new velocity system
    pub fn new() -> Self {
        Self
    }
}

impl System for VelocitySystem {
    fn name(&self) -> &str {
        "VelocitySystem"
    }

    fn update(&mut self, entities: &mut Entities, _ctx: &TickContext) {
        for entity in entities {
            let Some(velocity) = entity.get::<Velocity>().copied() else {
                continue;
            };
            if let Some(position) = entity.get_mut::<Position>() {
                position.0 += velocity.0;
            }
        }
    }
}

//! System trait and the context handed to every update

use super::world::Entities;

/// Stage dimensions that systems measure entities against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Stage width in pixels
    pub width: f32,
    /// Stage height in pixels
    pub height: f32,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Per-tick inputs shared by all systems of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    /// Timestamp of the frame that scheduled this tick, in milliseconds
    pub timestamp: f64,
    /// Number of ticks completed before this one
    pub tick: u64,
    /// Current stage dimensions
    pub viewport: Viewport,
}

/// A single behaviour applied to the entity collection once per tick
///
/// Systems get the world's current collection for the duration of the call
/// only. A system that wants an entity gone should flag it [`Deletable`] and
/// leave the removal to the delete system, not remove it directly.
///
/// [`Deletable`]: crate::ecs::components::Deletable
pub trait System {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Run the system
    fn update(&mut self, entities: &mut Entities, ctx: &TickContext);
}

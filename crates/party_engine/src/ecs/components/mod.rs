//! ECS Components module
//!
//! Pure data; behaviour lives in systems.

pub mod spatial;
pub mod appearance;
pub mod selection;

pub use spatial::{Bounds, Position, Repositionable, Velocity};
pub use appearance::{Renderable, SpriteRegion};
pub use selection::{Deletable, Selectable};

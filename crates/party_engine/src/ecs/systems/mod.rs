//! ECS Systems module
//!
//! Simulation systems in their required registration order, plus the
//! rendering pass which runs per frame rather than per tick.

pub mod velocity;
pub mod bounce;
pub mod selection;
pub mod delete;
pub mod reposition;
pub mod rendering_system;

pub use velocity::VelocitySystem;
pub use bounce::BounceSystem;
pub use selection::SelectionSystem;
pub use delete::DeleteSystem;
pub use reposition::RepositionSystem;
pub use rendering_system::RenderingSystem;

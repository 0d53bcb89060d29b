//! # Party Engine
//!
//! A small Entity-Component-System engine for 2D sprite toys: critters that
//! drift around a stage, bounce off its edges and vanish when clicked.
//!
//! ## Features
//!
//! - **ECS Architecture**: Entities with one component per kind, ordered systems
//! - **Fixed Timestep**: Simulation rate independent of the display rate
//! - **Spawn Schedule**: Geometrically accelerating population growth
//! - **Headless Rendering**: Drawing goes through a pluggable [`render::RenderTarget`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use party_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut engine = Engine::with_default_systems(&EngineConfig::default())?;
//!     engine.world_mut().add_entity(
//!         Entity::new()
//!             .with(Renderable)
//!             .with(Position::new(10.0, 10.0))
//!             .with(Velocity::new(1.0, 1.0))
//!             .with(Bounds::new(64.0, 64.0)),
//!     )?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod input;
pub mod render;
pub mod spawn;

mod engine;

pub use engine::{Engine, EngineConfig, EngineError, FrameLoop, FrameOutcome, FrameReport};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineConfig, EngineError, FrameLoop, FrameOutcome, FrameReport,
        config::{Config, ConfigError, LoopConfig, RepositionConfig, SpawnConfig, StageConfig, Theme},
        foundation::{
            math::{Rect, Vec2},
            time::{FixedTimestep, LoopError, Stopwatch},
        },
        ecs::{Entities, Entity, EntityId, World, WorldError, Component, System, TickContext, Viewport},
        ecs::components::{
            Bounds, Deletable, Position, Renderable, Repositionable, Selectable, SpriteRegion, Velocity,
        },
        input::{HitPolicy, Picker},
        render::{AtlasHandle, AtlasRegistry, RenderStats, RenderTarget, SpriteAtlas},
        spawn::{SpawnError, SpawnSchedule},
    };
}

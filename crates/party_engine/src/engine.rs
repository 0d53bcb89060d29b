//! Core engine implementation
//!
//! Ties the world to the fixed-timestep loop: every presentation frame runs
//! zero or more simulation ticks, then exactly one render pass.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{LoopConfig, RepositionConfig, StageConfig};
use crate::ecs::systems::{
    BounceSystem, DeleteSystem, RenderingSystem, RepositionSystem, SelectionSystem, VelocitySystem,
};
use crate::ecs::{Entity, EntityId, System, Viewport, World, WorldError};
use crate::foundation::time::{FixedTimestep, LoopError};
use crate::input::{HitPolicy, Picker};
use crate::render::{AtlasRegistry, RenderStats, RenderTarget};
use crate::spawn::{SpawnError, SpawnSchedule};

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid loop timing
    #[error("Loop error: {0}")]
    Loop(#[from] LoopError),

    /// Invalid spawn schedule
    #[error("Spawn error: {0}")]
    Spawn(#[from] SpawnError),

    /// World contract violation
    #[error("World error: {0}")]
    World(#[from] WorldError),
}

/// Engine configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Stage size and theme
    pub stage: StageConfig,
    /// Simulation rate
    pub timing: LoopConfig,
    /// Reposition tolerance
    pub reposition: RepositionConfig,
    /// Pointer activation policy
    pub hit_policy: HitPolicy,
    /// Seed for engine-side randomness; entropy when absent
    pub seed: Option<u64>,
}

/// Summary of one presented frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Zero-based frame number
    pub frame: u64,
    /// Simulation ticks run this frame
    pub ticks: u32,
    /// Elapsed time credited this frame
    pub delta_ms: f64,
    /// Entities spawned at the start of this frame
    pub spawned: u32,
    /// Draw calls issued by the render pass
    pub render: RenderStats,
}

/// Result of asking the loop for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The frame ran
    Presented(FrameReport),
    /// The loop has been stopped; nothing ran
    Stopped,
}

/// Fixed-timestep frame driver
///
/// Generic over the render callback so it can drive any presentation.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    timestep: FixedTimestep,
    frames: u64,
    done: bool,
}

impl FrameLoop {
    /// Create a loop around an accumulator
    pub fn new(timestep: FixedTimestep) -> Self {
        Self {
            timestep,
            frames: 0,
            done: false,
        }
    }

    /// Create a loop from configuration
    pub fn from_config(config: &LoopConfig) -> Result<Self, LoopError> {
        let timestep = FixedTimestep::from_rate(config.tick_rate_hz)?
            .with_max_frame_delta(config.max_frame_delta_ms);
        Ok(Self::new(timestep))
    }

    /// Run one frame
    ///
    /// The stop flag is checked first. A started tick always runs every
    /// system; `render` is called exactly once, after the ticks.
    pub fn frame(
        &mut self,
        timestamp: f64,
        world: &mut World,
        render: impl FnOnce(&World) -> RenderStats,
    ) -> FrameOutcome {
        if self.done {
            return FrameOutcome::Stopped;
        }

        let delta_ms = self.timestep.accumulate(timestamp);
        let mut ticks = 0;
        while self.timestep.consume_tick() {
            world.tick(timestamp);
            ticks += 1;
        }
        log::trace!("Frame {}: {} ticks, {:.3} ms carried", self.frames, ticks, self.timestep.accumulated_ms());

        let render = render(world);
        let report = FrameReport {
            frame: self.frames,
            ticks,
            delta_ms,
            spawned: 0,
            render,
        };
        self.frames += 1;
        FrameOutcome::Presented(report)
    }

    /// Stop the loop; takes effect at the next frame
    pub fn stop(&mut self) {
        if !self.done {
            log::info!("Loop stopped after {} frames", self.frames);
        }
        self.done = true;
    }

    /// Whether the loop is still running
    pub fn is_running(&self) -> bool {
        !self.done
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The underlying accumulator
    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }
}

type EntityFactory = Box<dyn FnMut(u32, Viewport) -> Entity>;

struct Spawner {
    schedule: SpawnSchedule,
    factory: EntityFactory,
}

/// Main engine struct
///
/// Owns the world, the frame loop, the render pass and pointer input.
pub struct Engine {
    world: World,
    frame_loop: FrameLoop,
    renderer: RenderingSystem,
    atlases: AtlasRegistry,
    picker: Picker,
    spawner: Option<Spawner>,
}

impl Engine {
    /// Create an engine with no systems registered
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        log::info!(
            "Initializing engine: stage {}x{}, {} ticks/s",
            config.stage.width,
            config.stage.height,
            config.timing.tick_rate_hz
        );
        Ok(Self {
            world: World::new(Viewport::new(config.stage.width, config.stage.height)),
            frame_loop: FrameLoop::from_config(&config.timing)?,
            renderer: RenderingSystem::new(config.stage.theme),
            atlases: AtlasRegistry::new(),
            picker: Picker::new(config.hit_policy),
            spawner: None,
        })
    }

    /// Create an engine with the standard simulation systems
    ///
    /// Order: velocity, bounce, selection, delete, reposition. Delete comes
    /// after selection so a selection is removed within the same tick.
    pub fn with_default_systems(config: &EngineConfig) -> Result<Self, EngineError> {
        let mut engine = Self::new(config)?;
        let reposition = match config.seed {
            Some(seed) => RepositionSystem::seeded(config.reposition, seed),
            None => RepositionSystem::new(config.reposition),
        };
        engine.add_system(VelocitySystem::new());
        engine.add_system(BounceSystem::new());
        engine.add_system(SelectionSystem::new());
        engine.add_system(DeleteSystem::new());
        engine.add_system(reposition);
        Ok(engine)
    }

    /// Register a simulation system after those already registered
    pub fn add_system(&mut self, system: impl System + 'static) {
        self.world.add_system(system);
    }

    /// Spawn entities from `factory` as `schedule` comes due
    pub fn set_spawner(
        &mut self,
        schedule: SpawnSchedule,
        factory: impl FnMut(u32, Viewport) -> Entity + 'static,
    ) {
        self.spawner = Some(Spawner {
            schedule,
            factory: Box::new(factory),
        });
    }

    /// Run one frame: due spawns, zero or more ticks, one render pass
    pub fn frame(&mut self, timestamp: f64, target: &mut dyn RenderTarget) -> Result<FrameOutcome, EngineError> {
        if !self.frame_loop.is_running() {
            return Ok(FrameOutcome::Stopped);
        }

        let spawned = self.spawn_due(timestamp)?;

        let Self {
            world,
            frame_loop,
            renderer,
            atlases,
            ..
        } = self;
        let outcome = frame_loop.frame(timestamp, world, |world| {
            renderer.render(world.entities(), world.viewport(), atlases, target)
        });

        Ok(match outcome {
            FrameOutcome::Presented(report) => FrameOutcome::Presented(FrameReport { spawned, ..report }),
            FrameOutcome::Stopped => FrameOutcome::Stopped,
        })
    }

    fn spawn_due(&mut self, timestamp: f64) -> Result<u32, EngineError> {
        let Some(spawner) = self.spawner.as_mut() else {
            return Ok(0);
        };
        let mut spawned = 0;
        while let Some(index) = spawner.schedule.poll(timestamp) {
            let entity = (spawner.factory)(index, self.world.viewport());
            self.world.add_entity(entity)?;
            spawned += 1;
        }
        Ok(spawned)
    }

    /// Apply a pointer activation at viewport coordinates
    pub fn activate(&mut self, x: f32, y: f32) -> Vec<EntityId> {
        self.picker.activate(self.world.entities_mut(), x, y)
    }

    /// Apply a viewport resize
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.resize(width, height);
    }

    /// Stop the loop; later frames return [`FrameOutcome::Stopped`]
    pub fn stop(&mut self) {
        self.frame_loop.stop();
    }

    /// Whether the loop is still running
    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Whether every scheduled spawn happened and nothing is left alive
    pub fn is_cleared(&self) -> bool {
        let spawns_done = self
            .spawner
            .as_ref()
            .map_or(true, |spawner| spawner.schedule.is_exhausted());
        spawns_done && self.world.is_empty()
    }

    /// The spawn schedule, if one is installed
    pub fn spawn_schedule(&self) -> Option<&SpawnSchedule> {
        self.spawner.as_ref().map(|spawner| &spawner.schedule)
    }

    /// The world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The frame loop
    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    /// Registered sprite atlases
    pub fn atlases(&self) -> &AtlasRegistry {
        &self.atlases
    }

    /// Registered sprite atlases, mutably
    pub fn atlases_mut(&mut self) -> &mut AtlasRegistry {
        &mut self.atlases
    }

    /// The render pass
    pub fn renderer_mut(&mut self) -> &mut RenderingSystem {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SpawnConfig, Theme};
    use crate::ecs::components::{Bounds, Deletable, Position, Renderable, Selectable, Velocity};
    use crate::foundation::math::Rect;
    use crate::render::SpriteAtlas;

    #[derive(Default)]
    struct CountingTarget {
        frames: usize,
        fills: usize,
    }

    impl RenderTarget for CountingTarget {
        fn begin_frame(&mut self, _viewport: Viewport, _theme: Theme) {
            self.frames += 1;
        }
        fn draw_sprite(&mut self, _atlas: &SpriteAtlas, _source: Rect, _dest: Rect) {}
        fn fill_rect(&mut self, _dest: Rect) {
            self.fills += 1;
        }
        fn highlight(&mut self, _dest: Rect) {}
    }

    fn config() -> EngineConfig {
        EngineConfig {
            stage: StageConfig {
                width: 100.0,
                height: 100.0,
                theme: Theme::Light,
            },
            timing: LoopConfig {
                tick_rate_hz: 100.0,
                max_frame_delta_ms: None,
            },
            seed: Some(11),
            ..EngineConfig::default()
        }
    }

    fn box_entity(x: f32, y: f32, vx: f32, vy: f32) -> Entity {
        Entity::new()
            .with(Renderable)
            .with(Position::new(x, y))
            .with(Velocity::new(vx, vy))
            .with(Bounds::new(10.0, 10.0))
            .with(Selectable::default())
            .with(Deletable::default())
    }

    fn ticks(outcome: FrameOutcome) -> u32 {
        match outcome {
            FrameOutcome::Presented(report) => report.ticks,
            FrameOutcome::Stopped => panic!("loop stopped"),
        }
    }

    #[test]
    fn test_ticks_follow_elapsed_time_and_render_once_per_frame() {
        let mut engine = Engine::with_default_systems(&config()).unwrap();
        let id = engine.world_mut().add_entity(box_entity(0.0, 0.0, 1.0, 0.0)).unwrap();
        let mut target = CountingTarget::default();

        // 10 ms per tick
        assert_eq!(ticks(engine.frame(5.0, &mut target).unwrap()), 0);
        assert_eq!(ticks(engine.frame(35.0, &mut target).unwrap()), 3);
        assert_eq!(ticks(engine.frame(36.0, &mut target).unwrap()), 0);

        assert_eq!(target.frames, 3);
        assert_eq!(engine.world().tick_count(), 3);
        let x = engine.world().entity(id).unwrap().get::<Position>().unwrap().x();
        assert_eq!(x, 3.0);
    }

    #[test]
    fn test_stopped_engine_does_no_work() {
        let mut engine = Engine::with_default_systems(&config()).unwrap();
        engine.world_mut().add_entity(box_entity(0.0, 0.0, 1.0, 0.0)).unwrap();
        let mut target = CountingTarget::default();

        engine.stop();

        assert_eq!(engine.frame(1000.0, &mut target).unwrap(), FrameOutcome::Stopped);
        assert_eq!(target.frames, 0);
        assert_eq!(engine.world().tick_count(), 0);
    }

    #[test]
    fn test_click_removes_entity_on_next_tick() {
        crate::foundation::logging::init_for_tests();
        let mut engine = Engine::with_default_systems(&config()).unwrap();
        let id = engine.world_mut().add_entity(box_entity(20.0, 20.0, 0.0, 0.0)).unwrap();
        let mut target = CountingTarget::default();

        assert_eq!(engine.activate(25.0, 25.0), vec![id]);
        // Not ticked yet: still present, drawn
        engine.frame(0.0, &mut target).unwrap();
        assert!(engine.world().entity(id).is_some());

        engine.frame(10.0, &mut target).unwrap();
        assert!(engine.world().entity(id).is_none());
        assert!(engine.is_cleared());
    }

    #[test]
    fn test_spawner_admits_entities_as_they_come_due() {
        let mut engine = Engine::with_default_systems(&config()).unwrap();
        let schedule = SpawnSchedule::new(
            SpawnConfig {
                initial_delay_ms: 100.0,
                decay: 1.0,
                floor_ms: 0.0,
                total: 3,
            },
            0.0,
        )
        .unwrap();
        engine.set_spawner(schedule, |index, _viewport| {
            box_entity(index as f32 * 20.0, 0.0, 0.0, 0.0)
        });
        let mut target = CountingTarget::default();

        let spawned = |outcome: FrameOutcome| match outcome {
            FrameOutcome::Presented(report) => report.spawned,
            FrameOutcome::Stopped => 0,
        };
        assert_eq!(spawned(engine.frame(0.0, &mut target).unwrap()), 1);
        assert_eq!(spawned(engine.frame(50.0, &mut target).unwrap()), 0);
        assert_eq!(spawned(engine.frame(250.0, &mut target).unwrap()), 2);
        assert_eq!(engine.world().len(), 3);
        assert!(engine.spawn_schedule().unwrap().is_exhausted());
        assert!(!engine.is_cleared());
    }

    #[test]
    fn test_non_finite_timestamps_neither_hang_nor_freeze_the_loop() {
        let mut engine = Engine::with_default_systems(&config()).unwrap();
        let id = engine.world_mut().add_entity(box_entity(0.0, 0.0, 1.0, 0.0)).unwrap();
        let mut target = CountingTarget::default();

        assert_eq!(ticks(engine.frame(f64::INFINITY, &mut target).unwrap()), 0);
        assert_eq!(ticks(engine.frame(f64::NAN, &mut target).unwrap()), 0);
        assert_eq!(ticks(engine.frame(20.0, &mut target).unwrap()), 2);

        let x = engine.world().entity(id).unwrap().get::<Position>().unwrap().x();
        assert_eq!(x, 2.0);
        assert_eq!(target.frames, 3);
    }

    #[test]
    fn test_resize_reaches_systems() {
        let mut engine = Engine::with_default_systems(&config()).unwrap();
        engine.resize(40.0, 40.0);
        assert_eq!(engine.world().viewport(), Viewport::new(40.0, 40.0));
    }

    #[test]
    fn test_invalid_tick_rate_is_rejected() {
        let mut bad = config();
        bad.timing.tick_rate_hz = 0.0;
        assert!(matches!(Engine::new(&bad), Err(EngineError::Loop(LoopError::InvalidTickRate(_)))));
    }

    #[test]
    fn test_default_systems_run_in_documented_order() {
        let engine = Engine::with_default_systems(&config()).unwrap();
        assert_eq!(
            engine.world().system_names(),
            vec!["VelocitySystem", "BounceSystem", "SelectionSystem", "DeleteSystem", "RepositionSystem"]
        );
    }
}

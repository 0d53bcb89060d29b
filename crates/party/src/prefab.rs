//! Critter prefab and spawn routine

use party_engine::ecs::components::{
    Bounds, Deletable, Position, Renderable, Repositionable, Selectable, SpriteRegion, Velocity,
};
use party_engine::ecs::{Entity, Viewport};
use party_engine::render::AtlasHandle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::CritterConfig;

/// Build a critter with the full component preset
pub fn critter(position: Position, velocity: Velocity, size: f32, sprite: SpriteRegion) -> Entity {
    Entity::new()
        .with(position)
        .with(Bounds::new(size, size))
        .with(velocity)
        .with(Renderable)
        .with(sprite)
        .with(Selectable::default())
        .with(Deletable::default())
        .with(Repositionable)
}

/// Makes the `n`th critter of the party
#[derive(Debug)]
pub struct CritterFactory<R: Rng = StdRng> {
    config: CritterConfig,
    atlas: AtlasHandle,
    rng: R,
}

impl CritterFactory<StdRng> {
    /// Create a factory, seeded when `seed` is given
    pub fn new(config: CritterConfig, atlas: AtlasHandle, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::with_rng(config, atlas, rng)
    }
}

impl<R: Rng> CritterFactory<R> {
    /// Create a factory drawing from `rng`
    pub fn with_rng(config: CritterConfig, atlas: AtlasHandle, rng: R) -> Self {
        Self { config, atlas, rng }
    }

    /// Atlas cell `(column, row)` used by spawn index `index`
    pub fn cell(&self, index: u32) -> (u32, u32) {
        let columns = self.config.atlas_columns.max(1);
        (index % columns, index / columns)
    }

    /// Spawn the critter for `index` somewhere on a stage of `viewport` size
    pub fn spawn(&mut self, index: u32, viewport: Viewport) -> Entity {
        let size = self.config.size;
        let (column, row) = self.cell(index);

        let position = Position::new(
            self.rng.gen::<f32>() * (viewport.width - size).max(0.0),
            self.rng.gen::<f32>() * (viewport.height - size).max(0.0),
        );
        let speed = self.rng.gen::<f32>() * self.config.speed_spread + self.config.min_speed;
        let velocity = Velocity::new(self.signed(speed), self.signed(speed));

        log::debug!("Critter {} from atlas cell ({}, {})", index, column, row);
        critter(position, velocity, size, SpriteRegion::grid_cell(self.atlas, column, row, size))
    }

    fn signed(&mut self, speed: f32) -> f32 {
        if self.rng.gen_bool(0.5) {
            speed
        } else {
            -speed
        }
    }
}

//! Game configuration

use party_engine::config::{Config, LoopConfig, RepositionConfig, SpawnConfig, StageConfig};
use party_engine::input::HitPolicy;
use party_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Game configuration
///
/// Every section falls back to its defaults, so a config file only needs
/// the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Stage size and theme
    pub stage: StageConfig,

    /// Simulation rate
    pub timing: LoopConfig,

    /// Population growth
    pub spawn: SpawnConfig,

    /// Critter appearance and motion
    pub critter: CritterConfig,

    /// Off-stage relocation
    pub reposition: RepositionConfig,

    /// Pointer handling
    pub input: InputConfig,

    /// Seed for every random draw; entropy when absent
    pub seed: Option<u64>,
}

impl Config for GameConfig {}

impl GameConfig {
    /// The engine-facing part of the configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            stage: self.stage,
            timing: self.timing,
            reposition: self.reposition,
            hit_policy: self.input.hit_policy,
            seed: self.seed,
        }
    }
}

/// Critter configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CritterConfig {
    /// Edge length of a critter and of its atlas cell, in pixels
    pub size: f32,

    /// Cells per atlas row
    pub atlas_columns: u32,

    /// Slowest speed per axis, in pixels per tick
    pub min_speed: f32,

    /// Added to `min_speed` for the fastest speed (exclusive)
    pub speed_spread: f32,
}

impl Default for CritterConfig {
    fn default() -> Self {
        Self {
            size: 64.0,
            atlas_columns: 16,
            min_speed: 0.5,
            speed_spread: 1.5,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Which overlapping critters an activation selects
    pub hit_policy: HitPolicy,
}

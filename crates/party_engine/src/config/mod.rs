//! Configuration system
//!
//! Engine-side configuration sections plus the [`Config`] trait that loads
//! any serde type from TOML or RON, picked by file extension.

use std::path::Path;

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Load configuration from file, falling back to defaults when it does not exist
    fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Background treatment applied before each frame is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Clear the surface to transparent
    #[default]
    Light,
    /// Fill the surface before drawing
    Dark,
}

/// Stage (viewport) configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Stage width in pixels
    pub width: f32,
    /// Stage height in pixels
    pub height: f32,
    /// Background theme
    pub theme: Theme,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            theme: Theme::Light,
        }
    }
}

/// Loop driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Simulation ticks per second
    pub tick_rate_hz: f64,
    /// Optional clamp on the time a single frame may credit
    pub max_frame_delta_ms: Option<f64>,
}

impl LoopConfig {
    /// Duration of one tick in milliseconds
    pub fn tick_duration_ms(&self) -> f64 {
        crate::foundation::time::MILLIS_PER_SECOND / self.tick_rate_hz
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            max_frame_delta_ms: None,
        }
    }
}

/// Spawn schedule configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Delay after the first spawn
    pub initial_delay_ms: f64,
    /// Factor the delay is multiplied by after every spawn
    pub decay: f64,
    /// Delay at which decay stops
    pub floor_ms: f64,
    /// Total number of spawns
    pub total: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 800.0,
            decay: 0.9,
            floor_ms: 200.0,
            total: 151,
        }
    }
}

/// Reposition system configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositionConfig {
    /// Tolerance subtracted from the far edge before comparing to the viewport
    pub inset: f32,
}

impl Default for RepositionConfig {
    fn default() -> Self {
        Self { inset: 4.0 }
    }
}

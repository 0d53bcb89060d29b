//! Spawn schedule
//!
//! Drives population growth from outside the world: the first spawn is due
//! at the start time, every later one after a delay that shrinks
//! geometrically until it reaches a floor, and the schedule ends after a
//! fixed number of spawns.

use thiserror::Error;

use crate::config::SpawnConfig;

/// Invalid spawn schedule configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpawnError {
    /// Decay factor must lie in `(0, 1]`
    #[error("Decay factor {0} must be in (0, 1]")]
    InvalidDecay(f64),

    /// Delays must be finite and non-negative
    #[error("Invalid {name} delay: {value} ms")]
    InvalidDelay {
        /// Which delay was rejected
        name: &'static str,
        /// The rejected value
        value: f64,
    },
}

/// Spawn timing state
#[derive(Debug, Clone)]
pub struct SpawnSchedule {
    config: SpawnConfig,
    spawned: u32,
    delay_ms: f64,
    next_due_ms: f64,
}

impl SpawnSchedule {
    /// Create a schedule whose first spawn is due at `start_ms`
    pub fn new(config: SpawnConfig, start_ms: f64) -> Result<Self, SpawnError> {
        if !(config.decay > 0.0 && config.decay <= 1.0) {
            return Err(SpawnError::InvalidDecay(config.decay));
        }
        for (name, value) in [("initial", config.initial_delay_ms), ("floor", config.floor_ms)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SpawnError::InvalidDelay { name, value });
            }
        }
        Ok(Self {
            config,
            spawned: 0,
            delay_ms: config.initial_delay_ms,
            next_due_ms: start_ms,
        })
    }

    /// Claim the next spawn if it is due at `now_ms`
    ///
    /// Returns the zero-based spawn index. Call repeatedly until `None` to
    /// catch up after a long gap. A non-finite `now_ms` claims nothing.
    pub fn poll(&mut self, now_ms: f64) -> Option<u32> {
        if self.is_exhausted() || !now_ms.is_finite() || now_ms < self.next_due_ms {
            return None;
        }

        let index = self.spawned;
        self.spawned += 1;
        if self.delay_ms > self.config.floor_ms {
            self.delay_ms *= self.config.decay;
        }
        self.next_due_ms += self.delay_ms;

        if self.is_exhausted() {
            log::info!("Spawn schedule finished after {} spawns", self.spawned);
        }
        Some(index)
    }

    /// Claim every spawn due at `now_ms`
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<u32> {
        std::iter::from_fn(|| self.poll(now_ms)).collect()
    }

    /// Whether every configured spawn has happened
    pub fn is_exhausted(&self) -> bool {
        self.spawned >= self.config.total
    }

    /// Spawns so far
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Spawns still to come
    pub fn remaining(&self) -> u32 {
        self.config.total.saturating_sub(self.spawned)
    }

    /// Delay that was added after the most recent spawn
    pub fn current_delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// When the next spawn is due, if any
    pub fn next_due_ms(&self) -> Option<f64> {
        (!self.is_exhausted()).then_some(self.next_due_ms)
    }
}

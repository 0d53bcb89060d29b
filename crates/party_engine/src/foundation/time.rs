//! Time management utilities
//!
//! Timestamps handed to the engine are milliseconds (`f64`) on a monotonic
//! clock chosen by the caller, the same unit a browser animation frame or a
//! `Stopwatch` produces.

use std::time::{Duration, Instant};
use thiserror::Error;

/// Milliseconds per second
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Errors raised for invalid loop timing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoopError {
    /// Tick duration must be finite and strictly positive
    #[error("Invalid tick duration: {0} ms")]
    InvalidTickDuration(f64),

    /// Tick rate must be finite and strictly positive
    #[error("Invalid tick rate: {0} Hz")]
    InvalidTickRate(f64),
}

/// Fixed-timestep accumulator
///
/// Each presentation frame feeds its timestamp into [`accumulate`](Self::accumulate);
/// the caller then drains whole ticks with [`consume_tick`](Self::consume_tick).
/// Whatever is left over (always less than one tick) carries into the next frame,
/// so the simulation rate stays constant regardless of the display rate.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step_ms: f64,
    accumulator_ms: f64,
    last_timestamp_ms: f64,
    max_frame_delta_ms: Option<f64>,
}

impl FixedTimestep {
    /// Create an accumulator with the given tick duration in milliseconds
    pub fn new(step_ms: f64) -> Result<Self, LoopError> {
        if !step_ms.is_finite() || step_ms <= 0.0 {
            return Err(LoopError::InvalidTickDuration(step_ms));
        }
        Ok(Self {
            step_ms,
            accumulator_ms: 0.0,
            last_timestamp_ms: 0.0,
            max_frame_delta_ms: None,
        })
    }

    /// Create an accumulator ticking `rate_hz` times per second
    pub fn from_rate(rate_hz: f64) -> Result<Self, LoopError> {
        if !rate_hz.is_finite() || rate_hz <= 0.0 {
            return Err(LoopError::InvalidTickRate(rate_hz));
        }
        Self::new(MILLIS_PER_SECOND / rate_hz)
    }

    /// Clamp the elapsed time credited by a single frame
    ///
    /// Without a clamp a long stall (debugger, suspended tab) is paid back
    /// in one burst of ticks.
    pub fn with_max_frame_delta(mut self, max_frame_delta_ms: Option<f64>) -> Self {
        self.max_frame_delta_ms = max_frame_delta_ms;
        self
    }

    /// Set the timestamp the first frame is measured from
    pub fn with_start(mut self, timestamp_ms: f64) -> Self {
        self.last_timestamp_ms = timestamp_ms;
        self
    }

    /// Credit the time elapsed since the previous frame; returns the delta used
    ///
    /// A non-finite timestamp credits nothing and is not remembered.
    pub fn accumulate(&mut self, timestamp_ms: f64) -> f64 {
        if !timestamp_ms.is_finite() {
            log::warn!("Non-finite frame timestamp {}, ignoring frame", timestamp_ms);
            return 0.0;
        }
        let mut delta = timestamp_ms - self.last_timestamp_ms;
        if delta < 0.0 {
            log::warn!(
                "Frame timestamp went backwards ({} -> {}), ignoring delta",
                self.last_timestamp_ms,
                timestamp_ms
            );
            delta = 0.0;
        }
        if let Some(max) = self.max_frame_delta_ms {
            delta = delta.min(max);
        }
        self.last_timestamp_ms = timestamp_ms;
        self.accumulator_ms += delta;
        delta
    }

    /// Take one tick from the accumulator if a whole tick is available
    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator_ms >= self.step_ms {
            self.accumulator_ms -= self.step_ms;
            true
        } else {
            false
        }
    }

    /// Tick duration in milliseconds
    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Time credited but not yet simulated
    pub fn accumulated_ms(&self) -> f64 {
        self.accumulator_ms
    }

    /// Timestamp of the most recent frame
    pub fn last_timestamp_ms(&self) -> f64 {
        self.last_timestamp_ms
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self
            .start_time
            .map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in milliseconds, the engine's timestamp unit
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed().as_secs_f64() * MILLIS_PER_SECOND
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

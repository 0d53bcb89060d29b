//! Input handling
//!
//! Pointer events are applied directly to the entity collection between
//! ticks; they never run inside the simulation schedule.

pub mod picking;

pub use picking::{entities_at, hit_test, HitPolicy, Picker};

//! Spatial components: where an entity is, how it moves and how big it is

use crate::foundation::math::{Rect, Vec2};

/// Top-left corner of an entity in stage space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

impl Position {
    /// Create a position
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Horizontal coordinate
    pub fn x(&self) -> f32 {
        self.0.x
    }

    /// Vertical coordinate
    pub fn y(&self) -> f32 {
        self.0.y
    }
}

impl Default for Position {
    fn default() -> Self {
        Self(Vec2::zeros())
    }
}

/// Displacement applied to [`Position`] once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec2);

impl Velocity {
    /// Create a velocity
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Horizontal component
    pub fn x(&self) -> f32 {
        self.0.x
    }

    /// Vertical component
    pub fn y(&self) -> f32 {
        self.0.y
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self(Vec2::zeros())
    }
}

/// Width and height of an entity's box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Box width
    pub width: f32,
    /// Box height
    pub height: f32,
}

impl Bounds {
    /// Create bounds
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Box occupied at `position`
    pub fn rect_at(&self, position: &Position) -> Rect {
        Rect::from_origin_size(position.0, self.size())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Marker: relocate the entity when its far edge leaves the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Repositionable;

//! Math utilities and types
//!
//! Provides the 2D math types used by stage-space components.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Axis-aligned rectangle in stage space (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,

    /// Width and height
    pub size: Vec2,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Create a rectangle from origin and size vectors
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Left edge
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    /// Top edge
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Right (far x) edge
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    /// Bottom (far y) edge
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    /// Half-open containment test: `[left, right) × [top, bottom)`
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

//! Presentation contract
//!
//! The engine decides *what* to draw each frame; a [`RenderTarget`]
//! supplied by the application decides *how*. Nothing in here mutates
//! simulation state.

pub mod atlas;

pub use atlas::{AtlasHandle, AtlasRegistry, SpriteAtlas};

use crate::config::Theme;
use crate::ecs::Viewport;
use crate::foundation::math::Rect;

/// Drawing surface driven by the render pass
pub trait RenderTarget {
    /// Prepare the surface for a new frame
    fn begin_frame(&mut self, viewport: Viewport, theme: Theme);

    /// Draw `source` from `atlas` into `dest`, scaling as needed
    fn draw_sprite(&mut self, atlas: &SpriteAtlas, source: Rect, dest: Rect);

    /// Fill `dest` with the foreground colour
    fn fill_rect(&mut self, dest: Rect);

    /// Emphasise `dest` (selected or pending deletion)
    fn highlight(&mut self, dest: Rect);
}

/// Draw calls issued during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Sprites drawn
    pub sprites: usize,
    /// Filled rectangles drawn
    pub rects: usize,
    /// Highlights drawn
    pub highlights: usize,
}

impl RenderStats {
    /// Total entities drawn
    pub fn drawn(&self) -> usize {
        self.sprites + self.rects
    }
}

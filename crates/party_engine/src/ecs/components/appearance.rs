//! Presentation components read by the render pass

use crate::foundation::math::Rect;
use crate::render::AtlasHandle;

/// Marker: the render pass draws this entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Renderable;

/// Source rectangle inside a sprite atlas
///
/// Drawn at the entity's position and scaled to its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRegion {
    /// Atlas the region is cut from
    pub atlas: AtlasHandle,
    /// Source rectangle in atlas pixels
    pub source: Rect,
}

impl SpriteRegion {
    /// Create a sprite region
    pub fn new(atlas: AtlasHandle, source: Rect) -> Self {
        Self { atlas, source }
    }

    /// Region of cell `(column, row)` in an atlas laid out as a uniform grid
    pub fn grid_cell(atlas: AtlasHandle, column: u32, row: u32, cell_size: f32) -> Self {
        Self::new(
            atlas,
            Rect::new(
                column as f32 * cell_size,
                row as f32 * cell_size,
                cell_size,
                cell_size,
            ),
        )
    }
}

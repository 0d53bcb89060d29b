//! Headless render targets
//!
//! The party runs without a window: one surface just counts what it was
//! asked to draw, the other rasterises boxes into a character grid that can
//! be printed to a terminal.

use std::fmt;

use party_engine::config::Theme;
use party_engine::ecs::Viewport;
use party_engine::foundation::math::Rect;
use party_engine::render::{RenderTarget, SpriteAtlas};

/// Counts draw calls
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingSurface {
    /// Frames begun
    pub frames: u64,
    /// Sprites drawn in the current frame
    pub sprites: usize,
    /// Rectangles filled in the current frame
    pub fills: usize,
    /// Highlights drawn in the current frame
    pub highlights: usize,
    /// Sprites drawn over every frame
    pub total_sprites: u64,
}

impl RecordingSurface {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderTarget for RecordingSurface {
    fn begin_frame(&mut self, _viewport: Viewport, _theme: Theme) {
        self.frames += 1;
        self.sprites = 0;
        self.fills = 0;
        self.highlights = 0;
    }

    fn draw_sprite(&mut self, _atlas: &SpriteAtlas, _source: Rect, _dest: Rect) {
        self.sprites += 1;
        self.total_sprites += 1;
    }

    fn fill_rect(&mut self, _dest: Rect) {
        self.fills += 1;
    }

    fn highlight(&mut self, _dest: Rect) {
        self.highlights += 1;
    }
}

const SPRITE: char = '#';
const FILL: char = '+';
const HIGHLIGHT: char = '*';

/// Character-grid rasteriser
///
/// The viewport is scaled onto `columns × rows` cells. A cell is painted
/// when a box covers any part of it; later draws overwrite earlier ones,
/// so collection order shows through as stacking.
#[derive(Debug, Clone)]
pub struct TextSurface {
    columns: usize,
    rows: usize,
    scale: (f32, f32),
    cells: Vec<char>,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
impl TextSurface {
    /// Create a grid of `columns × rows` cells
    pub fn new(columns: usize, rows: usize) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            columns,
            rows,
            scale: (1.0, 1.0),
            cells: vec![' '; columns * rows],
        }
    }

    /// Character at a cell, `None` outside the grid
    pub fn cell(&self, column: usize, row: usize) -> Option<char> {
        (column < self.columns && row < self.rows).then(|| self.cells[row * self.columns + column])
    }

    fn paint(&mut self, dest: Rect, glyph: char) {
        let (sx, sy) = self.scale;
        let span = |start: f32, end: f32, scale: f32, limit: usize| {
            let first = ((start * scale).floor().max(0.0) as usize).min(limit);
            let last = ((end * scale).ceil().max(0.0) as usize).min(limit);
            (first, last.max(first))
        };
        let (first_column, last_column) = span(dest.left(), dest.right(), sx, self.columns);
        let (first_row, last_row) = span(dest.top(), dest.bottom(), sy, self.rows);
        for row in first_row..last_row {
            let start = row * self.columns;
            self.cells[start + first_column..start + last_column].fill(glyph);
        }
    }

    fn outline(&mut self, dest: Rect) {
        let (sx, sy) = self.scale;
        let left = (dest.left() * sx).floor();
        let right = (dest.right() * sx).ceil() - 1.0;
        let top = (dest.top() * sy).floor();
        let bottom = (dest.bottom() * sy).ceil() - 1.0;
        for (column, row) in [(left, top), (right, top), (left, bottom), (right, bottom)] {
            if column < 0.0 || row < 0.0 {
                continue;
            }
            let (column, row) = (column as usize, row as usize);
            if column < self.columns && row < self.rows {
                self.cells[row * self.columns + column] = HIGHLIGHT;
            }
        }
    }
}

impl RenderTarget for TextSurface {
    fn begin_frame(&mut self, viewport: Viewport, theme: Theme) {
        self.scale = (
            self.columns as f32 / viewport.width.max(1.0),
            self.rows as f32 / viewport.height.max(1.0),
        );
        let background = match theme {
            Theme::Light => ' ',
            Theme::Dark => '.',
        };
        self.cells.fill(background);
    }

    fn draw_sprite(&mut self, _atlas: &SpriteAtlas, _source: Rect, dest: Rect) {
        self.paint(dest, SPRITE);
    }

    fn fill_rect(&mut self, dest: Rect) {
        self.paint(dest, FILL);
    }

    fn highlight(&mut self, dest: Rect) {
        self.outline(dest);
    }
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas() -> SpriteAtlas {
        SpriteAtlas::new("critters", 64, 64)
    }

    #[test]
    fn test_recording_resets_per_frame() {
        let mut surface = RecordingSurface::new();
        surface.begin_frame(Viewport::new(10.0, 10.0), Theme::Light);
        surface.draw_sprite(&atlas(), Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(0.0, 0.0, 1.0, 1.0));
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        surface.highlight(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!((surface.sprites, surface.fills, surface.highlights), (1, 1, 1));

        surface.begin_frame(Viewport::new(10.0, 10.0), Theme::Light);
        assert_eq!((surface.sprites, surface.fills, surface.highlights), (0, 0, 0));
        assert_eq!(surface.frames, 2);
        assert_eq!(surface.total_sprites, 1);
    }

    #[test]
    fn test_text_surface_scales_boxes_onto_grid() {
        let mut surface = TextSurface::new(10, 5);
        surface.begin_frame(Viewport::new(100.0, 50.0), Theme::Light);
        surface.fill_rect(Rect::new(20.0, 10.0, 20.0, 20.0));

        assert_eq!(surface.cell(1, 1), Some(' '));
        assert_eq!(surface.cell(2, 1), Some(FILL));
        assert_eq!(surface.cell(3, 2), Some(FILL));
        assert_eq!(surface.cell(4, 2), Some(' '));
        assert_eq!(surface.cell(2, 3), Some(' '));
        assert_eq!(surface.cell(10, 0), None);
    }

    #[test]
    fn test_text_surface_clips_and_themes() {
        let mut surface = TextSurface::new(4, 2);
        surface.begin_frame(Viewport::new(40.0, 20.0), Theme::Dark);
        surface.draw_sprite(&atlas(), Rect::new(0.0, 0.0, 64.0, 64.0), Rect::new(30.0, -5.0, 64.0, 64.0));

        assert_eq!(surface.to_string(), "...#\n...#\n");
    }

    #[test]
    fn test_highlight_marks_corners() {
        let mut surface = TextSurface::new(10, 10);
        surface.begin_frame(Viewport::new(10.0, 10.0), Theme::Light);
        let dest = Rect::new(2.0, 2.0, 4.0, 4.0);
        surface.draw_sprite(&atlas(), dest, dest);
        surface.highlight(dest);

        assert_eq!(surface.cell(2, 2), Some(HIGHLIGHT));
        assert_eq!(surface.cell(5, 5), Some(HIGHLIGHT));
        assert_eq!(surface.cell(3, 3), Some(SPRITE));
    }
}

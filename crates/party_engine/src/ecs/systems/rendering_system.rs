//! # Rendering System
//!
//! Walks the entity collection in order and turns every drawable entity
//! into calls on a [`RenderTarget`]. It runs once per presentation frame,
//! outside the tick, and only reads the entities.

use crate::config::Theme;
use crate::ecs::components::{Bounds, Deletable, Position, Selectable, SpriteRegion};
use crate::ecs::{ComponentMask, Entities, Entity, Viewport};
use crate::render::{AtlasRegistry, RenderStats, RenderTarget};

/// Presentation pass over the entity collection
#[derive(Debug)]
pub struct RenderingSystem {
    theme: Theme,
    /// Flag to enable/disable the system
    enabled: bool,
    frames_rendered: u64,
}

impl RenderingSystem {
    const REQUIRED: ComponentMask = ComponentMask::RENDERABLE
        .union(ComponentMask::POSITION)
        .union(ComponentMask::BOUNDS);

    /// Create a new rendering system
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            enabled: true,
            frames_rendered: 0,
        }
    }

    /// Enable or disable the rendering system
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if the system is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Change the background theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Frames presented so far
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Draw one frame
    pub fn render(
        &mut self,
        entities: &Entities,
        viewport: Viewport,
        atlases: &AtlasRegistry,
        target: &mut dyn RenderTarget,
    ) -> RenderStats {
        let mut stats = RenderStats::default();
        if !self.enabled {
            return stats;
        }

        target.begin_frame(viewport, self.theme);
        for entity in entities {
            Self::draw_entity(entity, atlases, target, &mut stats);
        }
        self.frames_rendered += 1;
        stats
    }

    fn draw_entity(
        entity: &Entity,
        atlases: &AtlasRegistry,
        target: &mut dyn RenderTarget,
        stats: &mut RenderStats,
    ) {
        if !entity.has_all(Self::REQUIRED) {
            return;
        }
        let (Some(position), Some(bounds)) = (entity.get::<Position>(), entity.get::<Bounds>()) else {
            return;
        };
        let dest = bounds.rect_at(position);

        let sprite = entity
            .get::<SpriteRegion>()
            .and_then(|region| atlases.get(region.atlas).map(|atlas| (atlas, region.source)));
        match sprite {
            Some((atlas, source)) => {
                target.draw_sprite(atlas, source, dest);
                stats.sprites += 1;
            }
            None => {
                target.fill_rect(dest);
                stats.rects += 1;
            }
        }

        let selected = entity.get::<Selectable>().is_some_and(|s| s.selected);
        let deleted = entity.get::<Deletable>().is_some_and(|d| d.deleted);
        if selected || deleted {
            target.highlight(dest);
            stats.highlights += 1;
        }
    }
}

impl Default for RenderingSystem {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Renderable;
    use crate::foundation::math::Rect;
    use crate::render::SpriteAtlas;

    #[derive(Debug, PartialEq)]
    enum Call {
        Begin(Theme),
        Sprite(String, Rect, Rect),
        Fill(Rect),
        Highlight(Rect),
    }

    #[derive(Default)]
    struct Recording(Vec<Call>);

    impl RenderTarget for Recording {
        fn begin_frame(&mut self, _viewport: Viewport, theme: Theme) {
            self.0.push(Call::Begin(theme));
        }
        fn draw_sprite(&mut self, atlas: &SpriteAtlas, source: Rect, dest: Rect) {
            self.0.push(Call::Sprite(atlas.name.clone(), source, dest));
        }
        fn fill_rect(&mut self, dest: Rect) {
            self.0.push(Call::Fill(dest));
        }
        fn highlight(&mut self, dest: Rect) {
            self.0.push(Call::Highlight(dest));
        }
    }

    fn drawable(x: f32, y: f32) -> Entity {
        Entity::new()
            .with(Renderable)
            .with(Position::new(x, y))
            .with(Bounds::new(10.0, 20.0))
    }

    #[test]
    fn test_draws_sprites_rects_and_highlights_in_order() {
        let mut atlases = AtlasRegistry::new();
        let sheet = atlases.register(SpriteAtlas::new("sheet", 128, 128));

        let mut entities = Entities::new();
        entities
            .push(drawable(1.0, 2.0).with(SpriteRegion::grid_cell(sheet, 1, 0, 64.0)))
            .unwrap();
        entities.push(drawable(5.0, 6.0).with(Selectable { selected: true })).unwrap();
        entities.push(drawable(7.0, 8.0).with(Deletable { deleted: true })).unwrap();
        // Not renderable: skipped entirely
        entities
            .push(Entity::new().with(Position::default()).with(Bounds::new(1.0, 1.0)))
            .unwrap();

        let mut target = Recording::default();
        let mut system = RenderingSystem::new(Theme::Dark);
        let stats = system.render(&entities, Viewport::new(100.0, 100.0), &atlases, &mut target);

        assert_eq!(
            target.0,
            vec![
                Call::Begin(Theme::Dark),
                Call::Sprite("sheet".into(), Rect::new(64.0, 0.0, 64.0, 64.0), Rect::new(1.0, 2.0, 10.0, 20.0)),
                Call::Fill(Rect::new(5.0, 6.0, 10.0, 20.0)),
                Call::Highlight(Rect::new(5.0, 6.0, 10.0, 20.0)),
                Call::Fill(Rect::new(7.0, 8.0, 10.0, 20.0)),
                Call::Highlight(Rect::new(7.0, 8.0, 10.0, 20.0)),
            ]
        );
        assert_eq!(stats, RenderStats { sprites: 1, rects: 2, highlights: 2 });
        assert_eq!(system.frames_rendered(), 1);
    }

    #[test]
    fn test_unknown_atlas_falls_back_to_fill() {
        let mut atlases = AtlasRegistry::new();
        let sheet = atlases.register(SpriteAtlas::new("sheet", 64, 64));
        atlases.unregister(sheet);

        let mut entities = Entities::new();
        entities
            .push(drawable(0.0, 0.0).with(SpriteRegion::grid_cell(sheet, 0, 0, 64.0)))
            .unwrap();

        let mut target = Recording::default();
        let stats = RenderingSystem::default().render(&entities, Viewport::new(10.0, 10.0), &atlases, &mut target);

        assert_eq!(stats.rects, 1);
        assert_eq!(stats.sprites, 0);
    }

    #[test]
    fn test_render_does_not_change_entities() {
        let mut entities = Entities::new();
        let id = entities.push(drawable(3.0, 4.0).with(Selectable { selected: true })).unwrap();

        let mut target = Recording::default();
        RenderingSystem::default().render(&entities, Viewport::new(10.0, 10.0), &AtlasRegistry::new(), &mut target);

        let entity = entities.get(id).unwrap();
        assert_eq!(entity.get::<Position>(), Some(&Position::new(3.0, 4.0)));
        assert!(entity.get::<Selectable>().unwrap().selected);
    }

    #[test]
    fn test_disabled_system_draws_nothing() {
        let mut entities = Entities::new();
        entities.push(drawable(0.0, 0.0)).unwrap();

        let mut target = Recording::default();
        let mut system = RenderingSystem::default();
        system.set_enabled(false);
        let stats = system.render(&entities, Viewport::new(10.0, 10.0), &AtlasRegistry::new(), &mut target);

        assert!(target.0.is_empty());
        assert_eq!(stats.drawn(), 0);
        assert!(!system.is_enabled());
    }
}

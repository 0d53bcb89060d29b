//! Sprite atlas registry
//!
//! The engine never touches pixels. An atlas here is a named descriptor the
//! presentation surface resolves to its own image; sprite regions refer to
//! it through a typed handle.

use crate::foundation::collections::{TypedHandle, TypedHandleMap};

/// Descriptor of an image that sprite regions are cut from
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAtlas {
    /// Name the presentation surface uses to find the image
    pub name: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl SpriteAtlas {
    /// Create an atlas descriptor
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// Number of `cell_size` cells per row and column
    pub fn grid(&self, cell_size: u32) -> (u32, u32) {
        if cell_size == 0 {
            return (0, 0);
        }
        (self.width / cell_size, self.height / cell_size)
    }
}

/// Handle to a registered [`SpriteAtlas`]
pub type AtlasHandle = TypedHandle<SpriteAtlas>;

/// Registered atlases
#[derive(Debug, Default)]
pub struct AtlasRegistry {
    atlases: TypedHandleMap<SpriteAtlas>,
}

impl AtlasRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an atlas and return its handle
    pub fn register(&mut self, atlas: SpriteAtlas) -> AtlasHandle {
        log::info!("Registered sprite atlas '{}' ({}x{})", atlas.name, atlas.width, atlas.height);
        self.atlases.insert(atlas)
    }

    /// Resolve a handle
    pub fn get(&self, handle: AtlasHandle) -> Option<&SpriteAtlas> {
        self.atlases.get(handle)
    }

    /// Drop an atlas; regions still pointing at it fall back to filled boxes
    pub fn unregister(&mut self, handle: AtlasHandle) -> Option<SpriteAtlas> {
        self.atlases.remove(handle)
    }

    /// Number of registered atlases
    pub fn len(&self) -> usize {
        self.atlases.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.atlases.is_empty()
    }
}

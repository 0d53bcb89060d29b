//! Component kinds, signatures and typed access
//!
//! The component set is closed: every kind has a fixed slot index, so an
//! entity stores at most one instance per kind in a dense array and typed
//! lookups are a single index plus a variant match.

use bitflags::bitflags;

use super::components::{
    Bounds, Deletable, Position, Renderable, Repositionable, Selectable, SpriteRegion, Velocity,
};

/// Every component kind known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// [`Position`]
    Position,
    /// [`Velocity`]
    Velocity,
    /// [`Bounds`]
    Bounds,
    /// [`Renderable`]
    Renderable,
    /// [`SpriteRegion`]
    SpriteRegion,
    /// [`Selectable`]
    Selectable,
    /// [`Deletable`]
    Deletable,
    /// [`Repositionable`]
    Repositionable,
}

impl ComponentKind {
    /// Number of component kinds, and so the number of slots per entity
    pub const COUNT: usize = 8;

    /// All kinds in slot order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Position,
        Self::Velocity,
        Self::Bounds,
        Self::Renderable,
        Self::SpriteRegion,
        Self::Selectable,
        Self::Deletable,
        Self::Repositionable,
    ];

    /// Slot index of this kind
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Signature bit of this kind
    pub const fn mask(self) -> ComponentMask {
        ComponentMask::from_bits_truncate(1 << self.index())
    }

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Position => "Position",
            Self::Velocity => "Velocity",
            Self::Bounds => "Bounds",
            Self::Renderable => "Renderable",
            Self::SpriteRegion => "SpriteRegion",
            Self::Selectable => "Selectable",
            Self::Deletable => "Deletable",
            Self::Repositionable => "Repositionable",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of component kinds attached to an entity
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentMask: u16 {
        /// Has [`Position`]
        const POSITION = 1 << 0;
        /// Has [`Velocity`]
        const VELOCITY = 1 << 1;
        /// Has [`Bounds`]
        const BOUNDS = 1 << 2;
        /// Has [`Renderable`]
        const RENDERABLE = 1 << 3;
        /// Has [`SpriteRegion`]
        const SPRITE_REGION = 1 << 4;
        /// Has [`Selectable`]
        const SELECTABLE = 1 << 5;
        /// Has [`Deletable`]
        const DELETABLE = 1 << 6;
        /// Has [`Repositionable`]
        const REPOSITIONABLE = 1 << 7;
    }
}

/// A component instance tagged with its kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnyComponent {
    /// Stage-space position
    Position(Position),
    /// Per-tick displacement
    Velocity(Velocity),
    /// Width and height
    Bounds(Bounds),
    /// Drawn by the render pass
    Renderable(Renderable),
    /// Source rectangle inside a sprite atlas
    SpriteRegion(SpriteRegion),
    /// Pointer selection flag
    Selectable(Selectable),
    /// Pending-removal flag
    Deletable(Deletable),
    /// Relocated when it leaves the viewport
    Repositionable(Repositionable),
}

impl AnyComponent {
    /// Kind of the wrapped component
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Position(_) => ComponentKind::Position,
            Self::Velocity(_) => ComponentKind::Velocity,
            Self::Bounds(_) => ComponentKind::Bounds,
            Self::Renderable(_) => ComponentKind::Renderable,
            Self::SpriteRegion(_) => ComponentKind::SpriteRegion,
            Self::Selectable(_) => ComponentKind::Selectable,
            Self::Deletable(_) => ComponentKind::Deletable,
            Self::Repositionable(_) => ComponentKind::Repositionable,
        }
    }
}

/// Plain-data component with a statically known kind
pub trait Component: Copy + Into<AnyComponent> + 'static {
    /// Slot this component occupies
    const KIND: ComponentKind;

    /// Borrow the concrete component out of a tagged slot
    fn downcast(any: &AnyComponent) -> Option<&Self>;

    /// Mutably borrow the concrete component out of a tagged slot
    fn downcast_mut(any: &mut AnyComponent) -> Option<&mut Self>;
}

macro_rules! impl_component {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for AnyComponent {
                fn from(component: $ty) -> Self {
                    Self::$ty(component)
                }
            }

            impl Component for $ty {
                const KIND: ComponentKind = ComponentKind::$ty;

                fn downcast(any: &AnyComponent) -> Option<&Self> {
                    match any {
                        AnyComponent::$ty(component) => Some(component),
                        _ => None,
                    }
                }

                fn downcast_mut(any: &mut AnyComponent) -> Option<&mut Self> {
                    match any {
                        AnyComponent::$ty(component) => Some(component),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_component!(
    Position,
    Velocity,
    Bounds,
    Renderable,
    SpriteRegion,
    Selectable,
    Deletable,
    Repositionable,
);

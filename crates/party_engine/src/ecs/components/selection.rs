//! Selection and deletion state
//!
//! Pointer activation sets [`Selectable::selected`]; the selection system
//! converts that into [`Deletable::deleted`]; the delete system removes the
//! entity. Nothing ever clears `deleted`.

/// Whether an entity has been activated by the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selectable {
    /// Activated since the last selection pass
    pub selected: bool,
}

impl Selectable {
    /// Mark as selected; returns `true` if the flag changed
    ///
    /// Activation is monotonic: selecting twice is a no-op, never a toggle.
    pub fn select(&mut self) -> bool {
        let changed = !self.selected;
        self.selected = true;
        changed
    }
}

/// Whether an entity is waiting to be removed from the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deletable {
    /// Flagged for removal
    pub deleted: bool,
}

impl Deletable {
    /// Flag for removal
    pub fn mark(&mut self) {
        self.deleted = true;
    }
}

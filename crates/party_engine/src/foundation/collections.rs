//! Specialized collection types

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub use slotmap::{SlotMap, DefaultKey};

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<DefaultKey, T>;

/// Typed handle for type-safe asset references
pub struct TypedHandle<T> {
    key: DefaultKey,
    _phantom: PhantomData<fn() -> T>,
}

// Manual impls: derives would demand the same traits from `T`
impl<T> Clone for TypedHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedHandle<T> {}

impl<T> PartialEq for TypedHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for TypedHandle<T> {}

impl<T> Hash for TypedHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T> fmt::Debug for TypedHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedHandle").field(&self.key).finish()
    }
}

impl<T> TypedHandle<T> {
    /// Create a new typed handle from a key
    pub fn new(key: DefaultKey) -> Self {
        Self {
            key,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying key
    pub fn key(&self) -> DefaultKey {
        self.key
    }
}

/// Slot map that hands out typed handles instead of raw keys
#[derive(Debug)]
pub struct TypedHandleMap<T> {
    items: HandleMap<T>,
}

impl<T> TypedHandleMap<T> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            items: HandleMap::new(),
        }
    }

    /// Insert an item and return its handle
    pub fn insert(&mut self, item: T) -> TypedHandle<T> {
        TypedHandle::new(self.items.insert(item))
    }

    /// Get an item by handle
    pub fn get(&self, handle: TypedHandle<T>) -> Option<&T> {
        self.items.get(handle.key())
    }

    /// Remove an item by handle
    pub fn remove(&mut self, handle: TypedHandle<T>) -> Option<T> {
        self.items.remove(handle.key())
    }

    /// Number of live items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for TypedHandleMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

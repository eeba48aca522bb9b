//! Handle registry
//!
//! An arena per resource kind. Handles are issued monotonically (the next
//! handle is the current table size) and stay valid for the lifetime of the
//! registry; there is no removal.

use crate::handle::ResourceHandle;
use std::marker::PhantomData;

/// Arena mapping handles of kind `H` to entries of type `T`.
pub struct HandleRegistry<H: ResourceHandle, T> {
    entries: Vec<T>,
    _marker: PhantomData<fn() -> H>,
}

impl<H: ResourceHandle, T> HandleRegistry<H, T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Create a registry with room for `capacity` entries before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            _marker: PhantomData,
        }
    }

    /// Assert that one more handle of this kind can be issued.
    ///
    /// Call before doing backend work for a new entry so that exhaustion
    /// aborts before a native object is created.
    ///
    /// # Panics
    ///
    /// Panics if the handle range of `H` is exhausted. This is a sizing
    /// error: widen the raw type of the handle.
    pub fn ensure_capacity(&self) {
        assert!(
            self.entries.len() < H::CAPACITY,
            "{} handle range exhausted ({} entries), the handle type needs a wider integer",
            H::KIND,
            H::CAPACITY
        );
    }

    /// Store `value` and issue its handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle range of `H` is exhausted.
    pub fn allocate(&mut self, value: T) -> H {
        self.ensure_capacity();
        let handle = H::from_index(self.entries.len());
        self.entries.push(value);
        handle
    }

    /// Look up an entry, returning `None` for the invalid sentinel.
    ///
    /// A valid handle that this registry never issued is a programming error
    /// and panics.
    pub fn get(&self, handle: H) -> Option<&T> {
        if !handle.is_valid() {
            return None;
        }
        Some(self.resolve(handle))
    }

    /// Resolve a handle issued by this registry.
    ///
    /// Precondition: `handle` was returned by [`allocate`](Self::allocate) on
    /// this registry. Violations trip a debug assertion, and the slice index
    /// panics in release builds.
    pub fn resolve(&self, handle: H) -> &T {
        debug_assert!(
            handle.index() < self.entries.len(),
            "{} handle {:?} out of range (registry holds {})",
            H::KIND,
            handle,
            self.entries.len()
        );
        &self.entries[handle.index()]
    }

    /// Mutable variant of [`resolve`](Self::resolve).
    pub fn resolve_mut(&mut self, handle: H) -> &mut T {
        debug_assert!(
            handle.index() < self.entries.len(),
            "{} handle {:?} out of range (registry holds {})",
            H::KIND,
            handle,
            self.entries.len()
        );
        &mut self.entries[handle.index()]
    }

    /// Whether `handle` refers to a live entry of this registry.
    pub fn contains(&self, handle: H) -> bool {
        handle.is_valid() && handle.index() < self.entries.len()
    }

    /// Number of issued handles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in issue order.
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (H::from_index(index), entry))
    }

    /// First handle whose entry matches `predicate` (linear scan).
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<H> {
        self.entries
            .iter()
            .position(|entry| predicate(entry))
            .map(H::from_index)
    }
}

impl<H: ResourceHandle, T> Default for HandleRegistry<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ResourceHandle, T> std::fmt::Debug for HandleRegistry<H, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleRegistry")
            .field("kind", &H::KIND)
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{define_handle, TextureHandle};

    define_handle!(
        /// Deliberately tiny handle for exhaustion tests
        TinyHandle(u8),
        "tiny"
    );

    #[test]
    fn test_allocation_is_monotonic() {
        let mut registry: HandleRegistry<TextureHandle, &str> = HandleRegistry::new();
        let a = registry.allocate("a");
        let b = registry.allocate("b");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(*registry.resolve(b), "b");
    }

    #[test]
    fn test_get_invalid_returns_none() {
        let mut registry: HandleRegistry<TextureHandle, u32> = HandleRegistry::new();
        registry.allocate(5);
        assert!(registry.get(TextureHandle::INVALID).is_none());
        assert_eq!(registry.get(TextureHandle::from_index(0)), Some(&5));
    }

    #[test]
    fn test_find_and_iter() {
        let mut registry: HandleRegistry<TextureHandle, u32> = HandleRegistry::new();
        for value in [10, 20, 30] {
            registry.allocate(value);
        }
        assert_eq!(registry.find(|v| *v == 20), Some(TextureHandle::from_index(1)));
        assert_eq!(registry.find(|v| *v == 40), None);
        let handles: Vec<_> = registry.iter().map(|(h, _)| h.index()).collect();
        assert_eq!(handles, vec![0, 1, 2]);
    }

    #[test]
    fn test_contains() {
        let mut registry: HandleRegistry<TextureHandle, ()> = HandleRegistry::new();
        let handle = registry.allocate(());
        assert!(registry.contains(handle));
        assert!(!registry.contains(TextureHandle::from_index(1)));
        assert!(!registry.contains(TextureHandle::INVALID));
    }

    #[test]
    fn test_tiny_registry_fills_to_capacity() {
        let mut registry: HandleRegistry<TinyHandle, ()> = HandleRegistry::new();
        for _ in 0..TinyHandle::CAPACITY {
            registry.allocate(());
        }
        assert_eq!(registry.len(), 255);
    }

    #[test]
    #[should_panic(expected = "tiny handle range exhausted")]
    fn test_exhaustion_is_fatal() {
        let mut registry: HandleRegistry<TinyHandle, ()> = HandleRegistry::new();
        for _ in 0..=TinyHandle::CAPACITY {
            registry.allocate(());
        }
    }

    #[test]
    #[should_panic]
    fn test_resolve_out_of_range_panics() {
        let registry: HandleRegistry<TextureHandle, u32> = HandleRegistry::new();
        registry.resolve(TextureHandle::from_index(3));
    }
}

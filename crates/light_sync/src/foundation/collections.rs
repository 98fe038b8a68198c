//! Specialized collection types

pub use slotmap::{new_key_type, Key, KeyData, SlotMap};

/// Pack a slot map key into an opaque `u64` that can cross API boundaries
pub fn key_to_raw<K: Key>(key: K) -> u64 {
    key.data().as_ffi()
}

/// Recover a slot map key from its opaque `u64` form
///
/// Stale or foreign values produce a key that simply fails lookups.
pub fn key_from_raw<K: Key + From<KeyData>>(raw: u64) -> K {
    K::from(KeyData::from_ffi(raw))
}

/// Free list for index-addressed objects; freed indices are reused
#[derive(Debug, Clone)]
pub struct FreeList<T> {
    items: Vec<Option<T>>,
    free_indices: Vec<usize>,
}

impl<T> FreeList<T> {
    /// Create a new free list
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            free_indices: Vec::new(),
        }
    }

    /// Insert an item and return its index
    pub fn insert(&mut self, item: T) -> usize {
        if let Some(index) = self.free_indices.pop() {
            self.items[index] = Some(item);
            index
        } else {
            let index = self.items.len();
            self.items.push(Some(item));
            index
        }
    }

    /// Remove an item by index
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let item = self.items.get_mut(index)?.take()?;
        self.free_indices.push(index);
        Some(item)
    }

    /// Get an item by index
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)?.as_ref()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.items.len() - self.free_indices.len()
    }

    /// Whether no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for FreeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

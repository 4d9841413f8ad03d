//! Bounded, insertion-ordered result store with FIFO eviction.

use crate::hashing::CacheKey;

/// Default number of results kept per node instance.
pub const DEFAULT_CACHE_CAPACITY: usize = 4;

/// A bounded key→result table, ordered by insertion.
///
/// Lookup is a linear scan; the capacity is small enough that no index
/// structure pays for itself. Eviction is first-in-first-out, not LRU: a hit
/// does not refresh an entry's position.
///
/// Inserting a key that is already present appends a second entry instead of
/// updating in place. `find` returns the first (oldest) match, so the later
/// duplicate is unreachable until the older one is evicted. Preserved
/// behavior, covered by tests.
#[derive(Debug)]
pub struct ResultStore<R> {
    entries: Vec<(CacheKey, R)>,
    capacity: usize,
}

impl<R> ResultStore<R> {
    /// Creates a store with a fixed capacity. The capacity cannot change
    /// after construction.
    pub fn new(capacity: usize) -> ResultStore<R> {
        ResultStore {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Index of the first (oldest) entry whose key equals `key`.
    pub fn find(&self, key: &CacheKey) -> Option<usize> {
        self.entries.iter().position(|(stored, _)| stored == key)
    }

    /// The stored result for `key`, if any. Absence means "not cached".
    pub fn retrieve(&self, key: &CacheKey) -> Option<&R> {
        self.find(key).map(|index| &self.entries[index].1)
    }

    /// Appends an entry, evicting the oldest one when over capacity.
    pub fn insert(&mut self, key: CacheKey, result: R) {
        self.entries.push((key, result));
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

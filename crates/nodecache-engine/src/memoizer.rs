//! Per-instance memoization of one computation function.

use tracing::debug;
use nodecache_structures::CallArguments;
use crate::hashing;
use crate::store::ResultStore;
use crate::Result;

/// Guards one node instance's computation so at most one fresh computation
/// happens per distinct argument key.
///
/// A memoizer is owned by exactly one node instance and lives as long as it
/// does. It is never shared across sibling instances: two instances of the
/// same type called with identical arguments each compute once. There is no
/// concurrency guard; the hosting environment serves one computation per
/// instance at a time.
#[derive(Debug)]
pub struct Memoizer<R> {
    store: ResultStore<R>,
}

impl<R: Clone> Memoizer<R> {
    pub fn new(capacity: usize) -> Memoizer<R> {
        Memoizer { store: ResultStore::new(capacity) }
    }

    /// Looks up the arguments' key and either returns the stored result or
    /// runs `compute` and stores its output.
    ///
    /// A failing computation propagates unchanged and is never stored, so the
    /// next identical call retries it (no negative caching). On a hit the
    /// stored result is returned as-is with zero recomputation.
    pub fn call<F>(&mut self, args: &CallArguments, compute: F) -> Result<R>
    where
        F: FnOnce(&CallArguments) -> Result<R>,
    {
        let key = hashing::hash_arguments(args);
        if let Some(result) = self.store.retrieve(&key) {
            debug!("in cache (key {})", key.raw());
            return Ok(result.clone());
        }
        debug!("not in cache (key {})", key.raw());
        let result = compute(args)?;
        self.store.insert(key, result.clone());
        Ok(result)
    }

    /// Number of results currently held.
    pub fn cached_count(&self) -> usize {
        self.store.len()
    }
}

//! The node capability seam and the caching decorator.
//!
//! Anything the registry can instantiate implements [`ComputeNode`]; the
//! caching variant of a type is the same trait implemented by a decorator
//! that routes every call through a private [`Memoizer`].

use std::sync::Arc;
use nodecache_structures::{ArgValue, CallArguments};
use crate::memoizer::Memoizer;
use crate::store::DEFAULT_CACHE_CAPACITY;
use crate::Result;

/// The opaque output of a node computation. The engine stores and returns it
/// without ever inspecting its contents; a cache hit hands back the identical
/// object.
pub type NodeOutput = Arc<ArgValue>;

/// A unit of computation: one entry point taking positional and named
/// arguments. Implementations are expected to be side-effect free and to
/// depend only on their declared arguments; the cache offers no correctness
/// guarantee otherwise.
pub trait ComputeNode {
    fn compute(&mut self, args: &CallArguments) -> Result<NodeOutput>;
}

/// Decorator giving one wrapped node instance a private memoization layer.
///
/// The memoizer is created lazily on the first call, so an instance that is
/// never invoked never allocates a store. The inner node keeps full ownership
/// of its own state; only its entry point is redirected.
pub struct CachedNode {
    inner: Box<dyn ComputeNode>,
    memoizer: Option<Memoizer<NodeOutput>>,
    cache_capacity: usize,
}

impl CachedNode {
    pub fn new(inner: Box<dyn ComputeNode>) -> CachedNode {
        CachedNode::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(inner: Box<dyn ComputeNode>, cache_capacity: usize) -> CachedNode {
        CachedNode {
            inner,
            memoizer: None,
            cache_capacity,
        }
    }

    /// Whether the first call has happened and the memoizer exists.
    pub fn is_primed(&self) -> bool {
        self.memoizer.is_some()
    }

    /// Number of results currently cached for this instance.
    pub fn cached_count(&self) -> usize {
        self.memoizer.as_ref().map_or(0, Memoizer::cached_count)
    }
}

impl ComputeNode for CachedNode {
    fn compute(&mut self, args: &CallArguments) -> Result<NodeOutput> {
        let capacity = self.cache_capacity;
        let memoizer = self.memoizer.get_or_insert_with(|| Memoizer::new(capacity));
        let inner = &mut self.inner;
        memoizer.call(args, |call_args| inner.compute(call_args))
    }
}

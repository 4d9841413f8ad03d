//! Transparent per-instance memoization for node computations.
//!
//! The engine turns a node type into a caching variant: every instance of the
//! wrapped type carries its own bounded result store, keyed by a structural
//! hash over the call's positional and named arguments. Caching is a pure
//! optimization; on any recoverable internal condition the engine falls back
//! to recomputation rather than surfacing an error.

pub mod config;
pub mod hashing;

mod error;
mod memoizer;
mod node;
mod registry;
mod store;

pub use error::{NodeCacheError, Result};
pub use hashing::{hash_arguments, hash_value, CacheKey};
pub use memoizer::Memoizer;
pub use node::{CachedNode, ComputeNode, NodeOutput};
pub use registry::{NodeTypeEntry, NodeTypeRegistry, CACHED_NAME_PREFIX, CACHED_NODES_CATEGORY};
pub use store::{ResultStore, DEFAULT_CACHE_CAPACITY};

//! # nodecache — transparent memoization for node computations
//!
//! nodecache wraps a node type so that every instance transparently carries a
//! small per-instance result cache, keyed by a structural hash over the
//! call's positional and named arguments. Equivalent calls return the stored
//! result instead of recomputing; everything else behaves exactly like the
//! unwrapped type, including failures.
//!
//! ## Quick start
//!
//! ```rust
//! use nodecache::prelude::*;
//! use std::sync::Arc;
//!
//! struct Adder;
//!
//! impl ComputeNode for Adder {
//!     fn compute(&mut self, args: &CallArguments) -> nodecache::engine::Result<NodeOutput> {
//!         let total = args
//!             .positional
//!             .iter()
//!             .map(|value| match value {
//!                 ArgValue::Scalar(ScalarValue::Int(v)) => *v,
//!                 _ => 0,
//!             })
//!             .sum::<i64>();
//!         Ok(Arc::new(ArgValue::from(total)))
//!     }
//! }
//!
//! let mut registry = NodeTypeRegistry::new();
//! registry.register("Adder", "math", || Box::new(Adder));
//!
//! // Install a caching sibling alongside the original type.
//! let cached_id = registry.create_cached_version("Adder", None, None).unwrap();
//! assert_eq!(cached_id, "cached_Adder");
//!
//! let mut node = registry.instantiate(&cached_id).unwrap();
//! let mut args = CallArguments::new();
//! args.push(1i64).push(2i64);
//!
//! let first = node.compute(&args).unwrap();
//! let second = node.compute(&args).unwrap();
//! assert!(Arc::ptr_eq(&first, &second)); // cache hit, identical result object
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export the value model
pub use nodecache_structures as structures;

// Re-export the caching engine
pub use nodecache_engine as engine;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::engine::config::{apply_config, find_config_file, load_config, CacherConfig};
    pub use crate::engine::{
        hash_arguments, hash_value, CacheKey, CachedNode, ComputeNode, Memoizer, NodeCacheError,
        NodeOutput, NodeTypeRegistry, ResultStore, DEFAULT_CACHE_CAPACITY,
    };
    pub use crate::structures::{ArgValue, CallArguments, ScalarValue, TensorBuffer, ValueError};
}

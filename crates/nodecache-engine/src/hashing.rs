//! Structural hashing of argument trees into cache keys.
//!
//! Collapses an arbitrary nested argument tree, including large tensor
//! buffers, into a single comparable key. Sequences and mappings are combined
//! with a wrapping sum, which is commutative: two sequences holding the same
//! multiset of elements in different order produce the same key. That is the
//! intended trade-off (cheap combination, argument order does not matter to
//! the surrounding system) and must not be swapped for an order-sensitive
//! combinator.
//!
//! Keys are deterministic within one process run. The hasher state is seeded
//! once per process, so keys are not comparable across runs.

use std::sync::OnceLock;
use std::time::Instant;
use ahash::RandomState;
use tracing::debug;
use nodecache_structures::{ArgValue, CallArguments, ScalarValue, TensorBuffer};

/// An opaque comparable key derived from an argument tree.
///
/// Semantically identical trees always yield equal keys; distinct trees may
/// collide (the summing combinator makes permutations collide on purpose).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey(u64);

impl CacheKey {
    /// The identity key: empty sequences and mappings hash to this.
    pub const IDENTITY: CacheKey = CacheKey(0);

    /// The raw key value, for logging and diagnostics.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// One hasher state per process. Keys stay stable for the lifetime of the
/// process, which is all the cache needs.
fn hash_state() -> &'static RandomState {
    static STATE: OnceLock<RandomState> = OnceLock::new();
    STATE.get_or_init(RandomState::new)
}

/// Hashes a single argument tree.
pub fn hash_value(value: &ArgValue) -> CacheKey {
    CacheKey(hash_node(value))
}

/// Hashes one call's positional and named arguments into the cache key.
///
/// Positional arguments hash as a sequence, named arguments as a mapping, and
/// the two halves combine with the same commutative sum used inside trees.
pub fn hash_arguments(args: &CallArguments) -> CacheKey {
    let positional = hash_sequence(&args.positional);
    let named = hash_mapping(&args.named);
    CacheKey(positional.wrapping_add(named))
}

fn hash_node(value: &ArgValue) -> u64 {
    match value {
        ArgValue::Scalar(scalar) => hash_scalar(scalar),
        ArgValue::Sequence(items) => hash_sequence(items),
        ArgValue::Mapping(entries) => hash_mapping(entries),
        ArgValue::Buffer(buffer) => hash_buffer(buffer),
        ArgValue::Opaque(repr) => hash_state().hash_one(repr.as_str()),
    }
}

fn hash_scalar(scalar: &ScalarValue) -> u64 {
    let state = hash_state();
    match scalar {
        ScalarValue::Int(v) => state.hash_one(v),
        // NaN payloads and signed zeros hash by bit pattern
        ScalarValue::Float(v) => state.hash_one(v.to_bits()),
        ScalarValue::Bool(v) => state.hash_one(v),
        ScalarValue::Text(v) => state.hash_one(v.as_str()),
    }
}

/// Commutative combination: element hashes are summed, so order is
/// deliberately not part of the key. Empty sequences hash to 0.
fn hash_sequence(items: &[ArgValue]) -> u64 {
    items.iter().map(hash_node).fold(0u64, u64::wrapping_add)
}

/// Each entry contributes `hash(key) ^ hash(value)`; entries combine with the
/// same commutative sum as sequences. Empty mappings hash to 0.
fn hash_mapping(entries: &[(String, ArgValue)]) -> u64 {
    entries
        .iter()
        .map(|(key, value)| hash_state().hash_one(key.as_str()) ^ hash_node(value))
        .fold(0u64, u64::wrapping_add)
}

/// The expensive path: materializes the buffer's canonical bytes and hashes
/// them together with the dtype tag and shape. Timed for observability, never
/// bounded or cancelled.
fn hash_buffer(buffer: &TensorBuffer) -> u64 {
    let started = Instant::now();
    let bytes = buffer.canonical_bytes();
    let key = hash_state().hash_one((buffer.dtype_tag(), buffer.get_shape(), bytes.as_ref()));
    debug!(
        "⏱️ [CACHE-HASH] {} hashed in {:.3}ms",
        buffer,
        started.elapsed().as_secs_f64() * 1000.0
    );
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_element_sequence_hashes_like_the_element() {
        // Consequence of the summing combinator: a one-element sequence is
        // indistinguishable from its element. Accepted, like permutations.
        let element = ArgValue::from(17i64);
        let wrapped = ArgValue::Sequence(vec![element.clone()]);
        assert_eq!(hash_value(&element), hash_value(&wrapped));
    }

    #[test]
    fn empty_collections_hash_to_identity() {
        assert_eq!(hash_value(&ArgValue::Sequence(vec![])), CacheKey::IDENTITY);
        assert_eq!(hash_value(&ArgValue::Mapping(vec![])), CacheKey::IDENTITY);
    }
}

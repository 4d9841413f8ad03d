//! Tests for the result store and the memoizer: FIFO eviction, duplicate-key
//! behavior, exactly-once computation, and failure retry.

use std::sync::Arc;
use nodecache_engine::{hash_value, CacheKey, Memoizer, NodeCacheError, ResultStore};
use nodecache_structures::ArgValue;
use nodecache_structures::CallArguments;

fn distinct_key(seed: i64) -> CacheKey {
    hash_value(&ArgValue::from(seed))
}

mod store_tests {
    use super::*;

    #[test]
    fn capacity_four_evicts_only_the_oldest() {
        let mut store: ResultStore<&str> = ResultStore::new(4);
        let keys: Vec<CacheKey> = (0..5).map(distinct_key).collect();

        store.insert(keys[0], "first");
        store.insert(keys[1], "second");
        store.insert(keys[2], "third");
        store.insert(keys[3], "fourth");
        assert_eq!(store.len(), 4);

        store.insert(keys[4], "fifth");
        assert_eq!(store.len(), 4);

        // first inserted is gone, the other four remain
        assert_eq!(store.retrieve(&keys[0]), None);
        assert_eq!(store.retrieve(&keys[1]), Some(&"second"));
        assert_eq!(store.retrieve(&keys[2]), Some(&"third"));
        assert_eq!(store.retrieve(&keys[3]), Some(&"fourth"));
        assert_eq!(store.retrieve(&keys[4]), Some(&"fifth"));
    }

    #[test]
    fn duplicate_key_insert_returns_the_oldest_result() {
        // No update-in-place: the second insert becomes dead weight until
        // the first copy is evicted. Intended behavior.
        let mut store: ResultStore<u32> = ResultStore::new(4);
        let key = distinct_key(42);

        store.insert(key, 1);
        store.insert(key, 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.find(&key), Some(0));
        assert_eq!(store.retrieve(&key), Some(&1));
    }

    #[test]
    fn evicting_the_older_duplicate_uncovers_the_newer_one() {
        let mut store: ResultStore<u32> = ResultStore::new(2);
        let key = distinct_key(7);

        store.insert(key, 1);
        store.insert(key, 2);
        assert_eq!(store.retrieve(&key), Some(&1));

        store.insert(distinct_key(8), 3);
        assert_eq!(store.retrieve(&key), Some(&2));
    }

    #[test]
    fn find_misses_on_an_empty_store() {
        let store: ResultStore<u32> = ResultStore::new(4);
        assert_eq!(store.find(&distinct_key(1)), None);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 4);
    }
}

mod memoizer_tests {
    use super::*;

    fn two_int_args(a: i64, b: i64) -> CallArguments {
        let mut args = CallArguments::new();
        args.push(a).push(b);
        args
    }

    #[test]
    fn second_identical_call_skips_the_computation() {
        let mut memoizer: Memoizer<Arc<ArgValue>> = Memoizer::new(4);
        let args = two_int_args(1, 2);
        let mut calls = 0;

        let first = memoizer
            .call(&args, |_| {
                calls += 1;
                Ok(Arc::new(ArgValue::from(3i64)))
            })
            .unwrap();
        let second = memoizer
            .call(&args, |_| {
                calls += 1;
                Ok(Arc::new(ArgValue::from(3i64)))
            })
            .unwrap();

        assert_eq!(calls, 1);
        // identical result object, not just an equal one
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn different_arguments_compute_independently() {
        let mut memoizer: Memoizer<Arc<ArgValue>> = Memoizer::new(4);
        let mut calls = 0;

        for seed in 0..3 {
            memoizer
                .call(&two_int_args(seed, seed), |_| {
                    calls += 1;
                    Ok(Arc::new(ArgValue::from(seed)))
                })
                .unwrap();
        }
        assert_eq!(calls, 3);
        assert_eq!(memoizer.cached_count(), 3);
    }

    #[test]
    fn failures_are_never_cached() {
        let mut memoizer: Memoizer<Arc<ArgValue>> = Memoizer::new(4);
        let args = two_int_args(1, 2);
        let mut calls = 0;

        let failed = memoizer.call(&args, |_| {
            calls += 1;
            Err(NodeCacheError::Computation("out of memory".to_string()))
        });
        assert!(failed.is_err());
        assert_eq!(memoizer.cached_count(), 0);

        // the retry runs the computation again
        let retried = memoizer.call(&args, |_| {
            calls += 1;
            Ok(Arc::new(ArgValue::from(3i64)))
        });
        assert!(retried.is_ok());
        assert_eq!(calls, 2);
        assert_eq!(memoizer.cached_count(), 1);
    }

    #[test]
    fn eviction_forces_recomputation_of_the_oldest_call() {
        let mut memoizer: Memoizer<Arc<ArgValue>> = Memoizer::new(4);
        let mut first_arg_computations = 0;

        for seed in 0..5 {
            let mut count = 0;
            memoizer
                .call(&two_int_args(seed, seed), |_| {
                    count += 1;
                    Ok(Arc::new(ArgValue::from(seed)))
                })
                .unwrap();
            if seed == 0 {
                first_arg_computations += count;
            }
        }

        // seed 0 was evicted by seed 4; calling it again recomputes
        memoizer
            .call(&two_int_args(0, 0), |_| {
                first_arg_computations += 1;
                Ok(Arc::new(ArgValue::from(0i64)))
            })
            .unwrap();
        assert_eq!(first_arg_computations, 2);
    }

    #[test]
    fn permuted_positional_arguments_hit_the_same_entry() {
        // Consequence of the order-insensitive combinator, preserved on
        // purpose: f(1, 2) and f(2, 1) share a cache entry.
        let mut memoizer: Memoizer<Arc<ArgValue>> = Memoizer::new(4);
        let mut calls = 0;

        memoizer
            .call(&two_int_args(1, 2), |_| {
                calls += 1;
                Ok(Arc::new(ArgValue::from(12i64)))
            })
            .unwrap();
        memoizer
            .call(&two_int_args(2, 1), |_| {
                calls += 1;
                Ok(Arc::new(ArgValue::from(21i64)))
            })
            .unwrap();

        assert_eq!(calls, 1);
    }
}

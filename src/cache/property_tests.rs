//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache contracts over arbitrary operation
//! sequences.

use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Small key space so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: i64 },
    Get { key: String },
    Remove { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
        1 => Just(CacheOp::Clear),
    ]
}

/// Straightforward model of insertion-order eviction without expiry.
#[derive(Default)]
struct Model {
    values: HashMap<String, i64>,
    order: VecDeque<String>,
}

impl Model {
    fn set(&mut self, key: &str, value: i64, max_size: usize) {
        if !self.values.contains_key(key) {
            if self.values.len() >= max_size {
                if let Some(oldest) = self.order.pop_front() {
                    self.values.remove(&oldest);
                }
            }
            self.order.push_back(key.to_string());
        }
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        self.order.retain(|k| k != key);
    }

    fn clear(&mut self) {
        self.values.clear();
        self.order.clear();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any value just stored reads back unchanged.
    #[test]
    fn prop_set_then_get(key in key_strategy(), value in value_strategy()) {
        let mut store = CacheStore::new(10, TEST_TTL);

        store.set(key.clone(), value);

        prop_assert!(store.has(&key));
        prop_assert_eq!(store.get(&key), Some(value));
    }

    // Size never exceeds max_size after a set, and the store agrees with the
    // eviction model on every key.
    #[test]
    fn prop_matches_insertion_order_model(
        max_size in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let mut store = CacheStore::new(max_size, TEST_TTL);
        let mut model = Model::default();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value);
                    model.set(&key, value, max_size);
                    prop_assert!(store.len() <= max_size);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.values.get(&key).copied());
                }
                CacheOp::Remove { key } => {
                    store.remove(&key);
                    model.remove(&key);
                }
                CacheOp::Clear => {
                    store.clear();
                    model.clear();
                }
            }
        }

        prop_assert_eq!(store.len(), model.values.len());
        prop_assert_eq!(store.keys(), model.order.iter().cloned().collect::<Vec<_>>());
    }

    // Overflowing by one distinct key drops exactly the first key inserted.
    #[test]
    fn prop_overflow_evicts_first_inserted(
        keys in prop::collection::hash_set(key_strategy(), 2..10)
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let max_size = keys.len() - 1;
        let mut store = CacheStore::new(max_size, TEST_TTL);

        for (i, key) in keys.iter().enumerate() {
            store.set(key.clone(), i as i64);
        }

        prop_assert_eq!(store.len(), max_size);
        prop_assert!(!store.has(&keys[0]));
        for key in &keys[1..] {
            prop_assert!(store.has(key));
        }
        prop_assert_eq!(store.stats().evictions, 1);
    }

    // Removing twice leaves the store as removing once did.
    #[test]
    fn prop_remove_is_idempotent(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 0..10),
        target in key_strategy()
    ) {
        let mut store = CacheStore::new(20, TEST_TTL);
        for (key, value) in entries {
            store.set(key, value);
        }

        store.remove(&target);
        let keys_once = store.keys();
        let stats_once = store.stats();
        store.remove(&target);

        prop_assert_eq!(store.keys(), keys_once);
        prop_assert_eq!(store.stats(), stats_once);
        prop_assert!(!store.has(&target));
    }

    // Clear hides every previously stored key.
    #[test]
    fn prop_clear_removes_everything(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..20)
    ) {
        let mut store = CacheStore::new(50, TEST_TTL);
        for (key, value) in &entries {
            store.set(key.clone(), *value);
        }

        store.clear();

        prop_assert!(store.is_empty());
        for (key, _) in &entries {
            prop_assert!(!store.has(key));
        }
    }

    // Hits and misses count every get.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = CacheStore::new(4, TEST_TTL);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => store.set(key, value),
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Remove { key } => store.remove(&key),
                CacheOp::Clear => store.clear(),
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, store.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // Once the TTL has passed, get reports absent and has agrees.
    #[test]
    fn prop_expired_entries_are_absent(
        key in key_strategy(),
        value in value_strategy(),
        ttl_ms in 1u64..5_000,
        extra_ms in 1u64..5_000
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();

        let (got, has_after) = rt.block_on(async {
            let mut store = CacheStore::new(10, Duration::from_millis(ttl_ms));
            store.set(key.clone(), value);

            tokio::time::advance(Duration::from_millis(ttl_ms + extra_ms)).await;

            let got = store.get(&key);
            (got, store.has(&key))
        });

        prop_assert_eq!(got, None);
        prop_assert!(!has_after);
    }
}

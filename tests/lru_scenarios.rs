// ==============================================
// LRU SCENARIO TESTS (integration)
// ==============================================
//
// Exercises both backends through the public traits and the builder, and
// checks that they stay observably identical under arbitrary operations.

use lrukit::builder::{Cache, CacheBuilder, LruBackend};
use lrukit::policy::linked_lru::LinkedLruCache;
use lrukit::policy::lru::LruCache;
use lrukit::traits::{CoreCache, LruCacheTrait, MutableCache};

const BACKENDS: [LruBackend; 2] = [LruBackend::Arena, LruBackend::Linked];

fn recency_order<C: LruCacheTrait<u32, String>>(cache: &mut C) -> Vec<u32> {
    // Drains the live cache to read its order, then reinserts from LRU to
    // MRU so the order and contents are restored.
    let mut drained = Vec::new();
    while let Some(entry) = cache.pop_lru() {
        drained.push(entry);
    }
    let keys: Vec<u32> = drained.iter().rev().map(|(k, _)| *k).collect();
    for (k, v) in drained {
        cache.insert(k, v);
    }
    keys
}

mod reference_scenario {
    use super::*;

    fn run<C: LruCacheTrait<u32, String>>(cache: &mut C) {
        assert_eq!(cache.capacity(), 3);
        for (k, v) in [(1, "one"), (2, "two"), (3, "three")] {
            cache.insert(k, v.to_string());
        }

        assert_eq!(cache.get(&1).map(String::as_str), Some("one"));
        cache.insert(4, "four".to_string());

        assert!(!cache.contains(&2), "2 was least recently used");
        assert!(cache.contains(&1));
        assert!(cache.contains(&3));
        assert!(cache.contains(&4));
        assert_eq!(cache.len(), 3);
        assert_eq!(recency_order(cache), vec![4, 1, 3]);
    }

    #[test]
    fn arena_backend() {
        run(&mut LruCache::new(3));
    }

    #[test]
    fn linked_backend() {
        run(&mut LinkedLruCache::new(3));
    }

    #[test]
    fn builder_backends() {
        for backend in BACKENDS {
            let mut cache: Cache<u32, String> = CacheBuilder::new(3).backend(backend).build();
            run(&mut cache);
            cache.check_invariants().unwrap();
        }
    }
}

mod update_semantics {
    use super::*;

    fn run<C: LruCacheTrait<u32, String>>(cache: &mut C) {
        cache.insert(1, "a".to_string());
        cache.insert(2, "b".to_string());

        // Updating an existing key never evicts and promotes it.
        assert_eq!(cache.insert(1, "A".to_string()), Some("a".to_string()));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));

        cache.insert(3, "c".to_string());
        assert!(!cache.contains(&2));
        assert_eq!(cache.get(&1).map(String::as_str), Some("A"));
    }

    #[test]
    fn arena_backend() {
        run(&mut LruCache::new(2));
    }

    #[test]
    fn linked_backend() {
        run(&mut LinkedLruCache::new(2));
    }
}

mod edge_cases {
    use super::*;

    #[test]
    fn capacity_one_keeps_last_insert() {
        for backend in BACKENDS {
            let mut cache = CacheBuilder::new(1).backend(backend).build::<u32, u32>();
            cache.put(1, 10);
            cache.put(2, 20);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&1), None);
            assert_eq!(cache.get(&2), Some(&20));
        }
    }

    #[test]
    fn miss_on_empty_cache_changes_nothing() {
        for backend in BACKENDS {
            let mut cache = CacheBuilder::new(4).backend(backend).build::<u32, u32>();
            assert_eq!(cache.get(&7), None);
            assert!(!cache.touch(&7));
            assert_eq!(cache.pop_lru(), None);
            assert_eq!(cache.peek_lru(), None);
            assert!(cache.is_empty());
            cache.check_invariants().unwrap();
        }
    }

    #[test]
    fn remove_batch_through_trait() {
        fn run<C: MutableCache<u32, u32>>(cache: &mut C) {
            cache.insert(1, 1);
            cache.insert(2, 2);
            assert_eq!(cache.remove_batch(&[2, 9, 1]), vec![Some(2), None, Some(1)]);
            assert!(cache.is_empty());
        }
        run(&mut LruCache::new(4));
        run(&mut LinkedLruCache::new(4));
    }

    #[test]
    fn zero_capacity_rejected_everywhere() {
        assert!(LruCache::<u32, u32>::try_new(0).is_err());
        assert!(LinkedLruCache::<u32, u32>::try_new(0).is_err());
        for backend in BACKENDS {
            assert!(CacheBuilder::new(0).backend(backend).try_build::<u32, u32>().is_err());
        }
    }
}

// ==============================================
// BACKEND EQUIVALENCE (property tests)
// ==============================================

mod backend_equivalence {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Put(u8, u16),
        Get(u8),
        Peek(u8),
        Remove(u8),
        Touch(u8),
        PopLru,
        Rank(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0u8..24, any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
            3 => (0u8..24).prop_map(Op::Get),
            1 => (0u8..24).prop_map(Op::Peek),
            1 => (0u8..24).prop_map(Op::Remove),
            1 => (0u8..24).prop_map(Op::Touch),
            1 => Just(Op::PopLru),
            1 => (0u8..24).prop_map(Op::Rank),
        ]
    }

    proptest! {
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_backends_agree(
            capacity in 1usize..12,
            ops in prop::collection::vec(op_strategy(), 0..300)
        ) {
            let mut arena: LruCache<u8, u16> = LruCache::new(capacity);
            let mut linked: LinkedLruCache<u8, u16> = LinkedLruCache::new(capacity);

            for op in ops {
                match op {
                    Op::Put(k, v) => {
                        prop_assert_eq!(arena.insert(k, v), linked.insert(k, v));
                    },
                    Op::Get(k) => {
                        prop_assert_eq!(arena.get(&k).copied(), linked.get(&k).copied());
                    },
                    Op::Peek(k) => {
                        prop_assert_eq!(arena.peek(&k), linked.peek(&k));
                    },
                    Op::Remove(k) => {
                        prop_assert_eq!(arena.remove(&k), linked.remove(&k));
                    },
                    Op::Touch(k) => {
                        prop_assert_eq!(arena.touch(&k), linked.touch(&k));
                    },
                    Op::PopLru => {
                        prop_assert_eq!(arena.pop_lru(), linked.pop_lru());
                    },
                    Op::Rank(k) => {
                        prop_assert_eq!(arena.recency_rank(&k), linked.recency_rank(&k));
                    },
                }

                prop_assert_eq!(arena.len(), linked.len());
                prop_assert!(arena.len() <= capacity);
                let a: Vec<(u8, u16)> = arena.iter().map(|(k, v)| (*k, *v)).collect();
                let l: Vec<(u8, u16)> = linked.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(a, l);
            }

            prop_assert!(arena.check_invariants().is_ok());
            prop_assert!(linked.check_invariants().is_ok());
        }

        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_distinct_puts_keep_last_capacity_keys(
            capacity in 1usize..16,
            count in 0usize..64
        ) {
            for backend in BACKENDS {
                let mut cache = CacheBuilder::new(capacity).backend(backend).build::<usize, usize>();
                for k in 0..count {
                    cache.put(k, k);
                }
                let expected_len = count.min(capacity);
                prop_assert_eq!(cache.len(), expected_len);
                for k in 0..count {
                    prop_assert_eq!(cache.contains(&k), k + capacity >= count);
                }
            }
        }
    }
}

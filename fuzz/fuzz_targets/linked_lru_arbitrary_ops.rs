#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::linked_lru::LinkedLruCache;

// Fuzz arbitrary operation sequences on LinkedLruCache
//
// The first byte picks the capacity; every following pair is (op, key).
// A Vec ordered MRU -> LRU serves as the reference model.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let capacity = usize::from(data[0] % 16) + 1;
    let mut cache: LinkedLruCache<u8, u32> = LinkedLruCache::new(capacity);
    let mut model: Vec<(u8, u32)> = Vec::new();

    let mut idx = 1;
    let mut step = 0u32;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let key = data[idx + 1] % 32;
        step += 1;

        match op {
            0 => {
                // insert
                let old = cache.insert(key, step);
                let expected = match model.iter().position(|(k, _)| *k == key) {
                    Some(pos) => Some(model.remove(pos).1),
                    None => {
                        if model.len() == capacity {
                            model.pop();
                        }
                        None
                    },
                };
                model.insert(0, (key, step));
                assert_eq!(old, expected);
            },
            1 => {
                // get
                let got = cache.get(&key).copied();
                let expected = model.iter().position(|(k, _)| *k == key).map(|pos| {
                    let entry = model.remove(pos);
                    model.insert(0, entry);
                    entry.1
                });
                assert_eq!(got, expected);
            },
            2 => {
                // peek (read-only)
                let expected = model.iter().find(|(k, _)| *k == key).map(|(_, v)| v);
                assert_eq!(cache.peek(&key), expected);
            },
            3 => {
                // remove
                let expected = model
                    .iter()
                    .position(|(k, _)| *k == key)
                    .map(|pos| model.remove(pos).1);
                assert_eq!(cache.remove(&key), expected);
            },
            4 => {
                // pop_lru
                assert_eq!(cache.pop_lru(), model.pop());
            },
            5 => {
                // touch
                let found = match model.iter().position(|(k, _)| *k == key) {
                    Some(pos) => {
                        let entry = model.remove(pos);
                        model.insert(0, entry);
                        true
                    },
                    None => false,
                };
                assert_eq!(cache.touch(&key), found);
            },
            6 => {
                // recency_rank
                let expected = model.iter().position(|(k, _)| *k == key);
                assert_eq!(cache.recency_rank(&key), expected);
            },
            7 => {
                // clear
                cache.clear();
                model.clear();
                assert!(cache.is_empty());
            },
            _ => unreachable!(),
        }

        assert_eq!(cache.len(), model.len());
        assert!(cache.len() <= capacity);
        assert_eq!(cache.peek_lru().map(|(k, v)| (*k, *v)), model.last().copied());
        assert_eq!(cache.peek_mru().map(|(k, v)| (*k, *v)), model.first().copied());

        idx += 2;
    }

    cache.check_invariants().unwrap();
    let order: Vec<(u8, u32)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(order, model);
});

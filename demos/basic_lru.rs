use lrukit::policy::lru::LruCache;

fn main() {
    let mut cache: LruCache<u32, String> = LruCache::new(3);

    cache.put(1, "one".to_string());
    cache.put(2, "two".to_string());
    cache.put(3, "three".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value);
    }

    cache.put(4, "four".to_string());

    println!("contains 2? {}", cache.contains(&2));
    let order: Vec<u32> = cache.keys().copied().collect();
    println!("mru -> lru: {:?}", order);
}

// Expected output:
// hit 1: one
// contains 2? false
// mru -> lru: [4, 1, 3]
//
// Explanation: capacity=3; after get(&1), key 1 is MRU and key 2 is LRU.
// Inserting key 4 evicts key 2.

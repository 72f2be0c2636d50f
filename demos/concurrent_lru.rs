//! Sharing one LRU cache between threads.
//!
//! Run with: cargo run --example concurrent_lru --features concurrency

use std::thread;

use lrukit::policy::lru::ConcurrentLruCache;

fn main() {
    let cache: ConcurrentLruCache<u64, String> = ConcurrentLruCache::new(128);

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..100u64 {
                    let key = t * 100 + i;
                    cache.put(key, format!("worker {} item {}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("worker panicked");
        }
    }

    println!("len: {}, capacity: {}", cache.len(), cache.capacity());
    println!("oldest: {:?}", cache.with_lock(|c| c.peek_lru().map(|(k, _)| *k)));
}

// Expected output (the oldest key depends on thread scheduling):
// len: 128, capacity: 128
// oldest: Some(..)

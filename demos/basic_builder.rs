//! Example demonstrating the CacheBuilder API.
//!
//! Run with: cargo run --example basic_builder

use lrukit::builder::{CacheBuilder, LruBackend};

fn main() {
    println!("=== CacheBuilder Examples ===\n");

    for (n, backend) in [LruBackend::Arena, LruBackend::Linked].into_iter().enumerate() {
        println!("{}. {:?} backend", n + 1, backend);
        let mut cache = CacheBuilder::new(3)
            .backend(backend)
            .build::<u64, String>();

        cache.insert(1, "one".to_string());
        cache.insert(2, "two".to_string());
        cache.insert(3, "three".to_string());

        // Access key 1 to make it MRU
        cache.get(&1);

        // Insert key 4, evicts LRU (key 2)
        cache.insert(4, "four".to_string());

        println!("   contains 1? {} (was accessed)", cache.contains(&1));
        println!("   contains 2? {} (evicted as LRU)", cache.contains(&2));
        println!("   rank of 3: {:?}", cache.recency_rank(&3));
        println!();
    }

    println!("3. Common Operations");
    let mut cache = CacheBuilder::new(10).build::<u64, String>();

    cache.insert(1, "original".to_string());
    let old = cache.insert(1, "updated".to_string());
    println!("   insert returned previous: {:?}", old);

    if let Some(value) = cache.get(&1) {
        println!("   get(&1): {}", value);
    }

    println!("   contains(&99): {}", cache.contains(&99));
    println!(
        "   len: {}, capacity: {}, is_empty: {}",
        cache.len(),
        cache.capacity(),
        cache.is_empty()
    );

    cache.clear();
    println!("   after clear - is_empty: {}", cache.is_empty());
    println!();

    println!("4. Invalid configuration");
    match CacheBuilder::new(0).try_build::<u64, String>() {
        Ok(_) => println!("   unexpectedly built"),
        Err(e) => println!("   error: {}", e),
    }
}

// Expected output:
// === CacheBuilder Examples ===
//
// 1. Arena backend
//    contains 1? true (was accessed)
//    contains 2? false (evicted as LRU)
//    rank of 3: Some(2)
//
// 2. Linked backend
//    contains 1? true (was accessed)
//    contains 2? false (evicted as LRU)
//    rank of 3: Some(2)
//
// 3. Common Operations
//    insert returned previous: Some("original")
//    get(&1): updated
//    contains(&99): false
//    len: 1, capacity: 10, is_empty: false
//    after clear - is_empty: true
//
// 4. Invalid configuration
//    error: cache capacity must be greater than zero

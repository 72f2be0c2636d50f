//! # Cache Trait Hierarchy
//!
//! Both LRU backends ([`LruCache`](crate::policy::lru::LruCache) and
//! [`LinkedLruCache`](crate::policy::linked_lru::LinkedLruCache)) implement
//! the same three traits, so callers can stay generic over the backend.
//!
//! ```text
//!   ┌─────────────────────────────────┐
//!   │        CoreCache<K, V>          │
//!   │  insert / get / contains        │
//!   │  len / is_empty / capacity      │
//!   │  clear                          │
//!   └───────────────┬─────────────────┘
//!                   ▼
//!   ┌─────────────────────────────────┐
//!   │       MutableCache<K, V>        │
//!   │  remove / remove_batch          │
//!   └───────────────┬─────────────────┘
//!                   ▼
//!   ┌─────────────────────────────────┐
//!   │       LruCacheTrait<K, V>       │
//!   │  pop_lru / peek_lru             │
//!   │  touch / recency_rank           │
//!   └─────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use lrukit::traits::{CoreCache, LruCacheTrait};
//! use lrukit::policy::linked_lru::LinkedLruCache;
//! use lrukit::policy::lru::LruCache;
//!
//! fn warm<C: CoreCache<u32, &'static str>>(cache: &mut C) {
//!     cache.insert(1, "one");
//!     cache.insert(2, "two");
//! }
//!
//! let mut arena = LruCache::new(4);
//! let mut linked = LinkedLruCache::new(4);
//! warm(&mut arena);
//! warm(&mut linked);
//! assert_eq!(arena.peek_lru().map(|(k, _)| *k), Some(1));
//! assert_eq!(linked.peek_lru().map(|(k, _)| *k), Some(1));
//! ```

/// Operations every cache supports.
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key
    /// was present.
    ///
    /// A new key inserted into a full cache evicts exactly one entry, chosen
    /// by the cache's policy.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up a value. May update eviction state; use
    /// [`contains`](Self::contains) to test presence without side effects.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks presence without touching eviction state.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries held at once.
    fn capacity(&self) -> usize;

    /// Removes every entry. Capacity is unchanged.
    fn clear(&mut self);
}

/// Caches that support removing an arbitrary key.
///
/// ```
/// use lrukit::traits::{CoreCache, MutableCache};
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(4);
/// cache.insert(1, "a");
/// cache.insert(2, "b");
/// assert_eq!(cache.remove_batch(&[1, 3]), vec![Some("a"), None]);
/// assert!(cache.contains(&2));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes several keys; results are in input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// Recency-ordered operations.
///
/// ```
/// use lrukit::traits::{CoreCache, LruCacheTrait};
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
///
/// assert!(cache.touch(&1));
/// assert_eq!(cache.recency_rank(&1), Some(0));
/// assert_eq!(cache.pop_lru(), Some((2, "second")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without promoting it.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Promotes `key` to most recently used. Returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, 0 being most recent. O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

//! Runtime selection of an LRU backend.
//!
//! ```rust
//! use lrukit::builder::{CacheBuilder, LruBackend};
//!
//! let mut cache = CacheBuilder::new(100)
//!     .backend(LruBackend::Linked)
//!     .build::<u64, String>();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! assert_eq!(cache.backend(), LruBackend::Linked);
//! ```

use std::fmt;
use std::hash::Hash;

use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MetricsReset, MetricsSnapshotProvider};
use crate::policy::linked_lru::LinkedLruCache;
use crate::policy::lru::LruCache;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Storage behind a [`Cache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LruBackend {
    /// Hash index over a sentinel-bounded list in a slot arena.
    #[default]
    Arena,
    /// `hashlink::LinkedHashMap` with its linked order as the recency list.
    Linked,
}

/// Cache produced by [`CacheBuilder`]; same contract for every backend.
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V> {
    Arena(LruCache<K, V>),
    Linked(LinkedLruCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn backend(&self) -> LruBackend {
        match &self.inner {
            CacheInner::Arena(_) => LruBackend::Arena,
            CacheInner::Linked(_) => LruBackend::Linked,
        }
    }

    /// Stores `value`, evicting the LRU entry if a new key overflows capacity.
    pub fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    /// Returns the replaced value if `key` was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Arena(lru) => lru.insert(key, value),
            CacheInner::Linked(lru) => lru.insert(key, value),
        }
    }

    /// Returns the value and promotes `key` to most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Arena(lru) => lru.get(key),
            CacheInner::Linked(lru) => lru.get(key),
        }
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match &mut self.inner {
            CacheInner::Arena(lru) => lru.get_mut(key),
            CacheInner::Linked(lru) => lru.get_mut(key),
        }
    }

    pub fn peek(&self, key: &K) -> Option<&V> {
        match &self.inner {
            CacheInner::Arena(lru) => lru.peek(key),
            CacheInner::Linked(lru) => lru.peek(key),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Arena(lru) => lru.contains(key),
            CacheInner::Linked(lru) => lru.contains(key),
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Arena(lru) => lru.remove(key),
            CacheInner::Linked(lru) => lru.remove(key),
        }
    }

    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        match &mut self.inner {
            CacheInner::Arena(lru) => lru.pop_lru(),
            CacheInner::Linked(lru) => lru.pop_lru(),
        }
    }

    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        match &self.inner {
            CacheInner::Arena(lru) => lru.peek_lru(),
            CacheInner::Linked(lru) => lru.peek_lru(),
        }
    }

    pub fn touch(&mut self, key: &K) -> bool {
        match &mut self.inner {
            CacheInner::Arena(lru) => lru.touch(key),
            CacheInner::Linked(lru) => lru.touch(key),
        }
    }

    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        match &self.inner {
            CacheInner::Arena(lru) => lru.recency_rank(key),
            CacheInner::Linked(lru) => lru.recency_rank(key),
        }
    }

    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Arena(lru) => lru.len(),
            CacheInner::Linked(lru) => lru.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Arena(lru) => lru.capacity(),
            CacheInner::Linked(lru) => lru.capacity(),
        }
    }

    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Arena(lru) => lru.clear(),
            CacheInner::Linked(lru) => lru.clear(),
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match &self.inner {
            CacheInner::Arena(lru) => lru.check_invariants(),
            CacheInner::Linked(lru) => lru.check_invariants(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Counters of whichever backend was built.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        match &self.inner {
            CacheInner::Arena(lru) => lru.metrics_snapshot(),
            CacheInner::Linked(lru) => lru.metrics_snapshot(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for Cache<K, V> {
    fn reset_metrics(&mut self) {
        match &mut self.inner {
            CacheInner::Arena(lru) => lru.reset_metrics(),
            CacheInner::Linked(lru) => lru.reset_metrics(),
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        Cache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        Cache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        Cache::contains(self, key)
    }

    fn len(&self) -> usize {
        Cache::len(self)
    }

    fn capacity(&self) -> usize {
        Cache::capacity(self)
    }

    fn clear(&mut self) {
        Cache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        Cache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        Cache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        Cache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        Cache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        Cache::recency_rank(self, key)
    }
}

impl<K, V> fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            CacheInner::Arena(lru) => f.debug_tuple("Cache").field(lru).finish(),
            CacheInner::Linked(lru) => f.debug_tuple("Cache").field(lru).finish(),
        }
    }
}

/// Builder for [`Cache`].
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
    backend: LruBackend,
}

impl CacheBuilder {
    /// Starts a builder for a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            backend: LruBackend::default(),
        }
    }

    pub fn backend(mut self, backend: LruBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. See [`try_build`](Self::try_build).
    pub fn build<K, V>(self) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the cache, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero.
    ///
    /// ```
    /// use lrukit::builder::CacheBuilder;
    ///
    /// assert!(CacheBuilder::new(0).try_build::<u32, u32>().is_err());
    /// ```
    pub fn try_build<K, V>(self) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let inner = match self.backend {
            LruBackend::Arena => CacheInner::Arena(LruCache::try_new(self.capacity)?),
            LruBackend::Linked => CacheInner::Linked(LinkedLruCache::try_new(self.capacity)?),
        };
        Ok(Cache { inner })
    }
}

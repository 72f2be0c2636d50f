//! LRU cache backed by an insertion-ordered hash map.
//!
//! Drop-in alternative to [`LruCache`](crate::policy::lru::LruCache) with the
//! same contract. The recency list is the linked order of a
//! [`hashlink::LinkedHashMap`]: the back of the map is the most recently used
//! entry and the front is the least recently used.
//!
//! ```text
//!   LinkedHashMap order:  front ──► [a] ◄──► [b] ◄──► [c] ◄── back
//!                                    LRU               MRU
//!   get(a):  to_back(a)   front ──► [b] ◄──► [c] ◄──► [a] ◄── back
//! ```
//!
//! Useful as a reference implementation when checking the arena backend, and
//! when a dependency on `hashlink` is already present.

use std::fmt;
use std::hash::Hash;

use hashlink::LinkedHashMap;
use rustc_hash::FxBuildHasher;

use crate::error::{validate_capacity, ConfigError, InvariantError, ZERO_CAPACITY};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// LRU cache over [`LinkedHashMap`].
///
/// ```
/// use lrukit::policy::linked_lru::LinkedLruCache;
///
/// let mut cache = LinkedLruCache::new(2);
/// cache.put(1, 1);
/// cache.put(2, 2);
/// assert_eq!(cache.get(&1), Some(&1));
/// cache.put(3, 3);
/// assert_eq!(cache.get(&2), None);
/// ```
pub struct LinkedLruCache<K, V> {
    map: LinkedHashMap<K, V, FxBuildHasher>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LinkedLruCache<K, V>
where
    K: Eq + Hash,
{
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(_) => panic!("{}", ZERO_CAPACITY),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = validate_capacity(capacity)?;
        Ok(Self {
            map: LinkedHashMap::with_capacity_and_hasher(
                capacity.min(1 << 16),
                FxBuildHasher::default(),
            ),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the value and marks `key` most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.get_mut(key).map(|value| &*value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let value = self.map.to_back(key);

        #[cfg(feature = "metrics")]
        if value.is_some() {
            self.metrics.record_get_hit();
        } else {
            self.metrics.record_get_miss();
        }

        value
    }

    /// Returns the value without changing recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let value = self.map.get(key)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        Some(value)
    }

    #[inline]
    pub fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(slot) = self.map.to_back(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            return Some(std::mem::replace(slot, value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.map.len() >= self.capacity && self.map.pop_front().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();

            #[cfg(feature = "tracing")]
            tracing::trace!(
                len = self.map.len(),
                capacity = self.capacity,
                "evicted least recently used entry"
            );
        }

        self.map.insert(key, value);
        None
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let value = self.map.remove(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(value)
    }

    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.map.pop_front()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some(entry)
    }

    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.map.front()
    }

    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.map.back()
    }

    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let found = self.map.to_back(key).is_some();

        #[cfg(feature = "metrics")]
        if found {
            self.metrics.record_touch_found();
        }

        found
    }

    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();

        if !self.map.contains_key(key) {
            return None;
        }

        let rank = self.map.keys().rev().position(|k| {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();
            k == key
        });

        #[cfg(feature = "metrics")]
        if rank.is_some() {
            (&self.metrics).record_recency_rank_found();
        }

        rank
    }

    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.map.clear();
    }

    /// Entries from most to least recently used.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.map.iter().rev()
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.map.keys().rev()
    }

    /// Checks the capacity bound, then walks the linked order and confirms
    /// every visited key resolves through the hash table to the value the
    /// walk saw, and that the walk covers exactly `len` entries. O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "cache holds {} entries, over capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        let mut walked = 0usize;
        for (position, (key, value)) in self.map.iter().enumerate() {
            match self.map.get(key) {
                Some(found) if std::ptr::eq(found, value) => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "linked entry {} resolves to a different slot in the hash table",
                        position
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "linked entry {} is missing from the hash table",
                        position
                    )));
                },
            }
            walked += 1;
        }
        if walked != self.map.len() {
            return Err(InvariantError::new(format!(
                "linked order visits {} entries but map reports {}",
                walked,
                self.map.len()
            )));
        }
        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LinkedLruCache<K, V>
where
    K: Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.map.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LinkedLruCache<K, V>
where
    K: Eq + Hash,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for LinkedLruCache<K, V> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl<K, V> CoreCache<K, V> for LinkedLruCache<K, V>
where
    K: Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LinkedLruCache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LinkedLruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LinkedLruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LinkedLruCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for LinkedLruCache<K, V>
where
    K: Eq + Hash,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        LinkedLruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LinkedLruCache<K, V>
where
    K: Eq + Hash,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LinkedLruCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LinkedLruCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LinkedLruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LinkedLruCache::recency_rank(self, key)
    }
}

impl<K, V> fmt::Debug for LinkedLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedLruCache")
            .field("len", &self.map.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LinkedLruCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LinkedLruCache<K, V>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

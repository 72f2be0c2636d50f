//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity key-value cache that evicts the entry which has gone the
//! longest without being read or written.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V>                             │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (index)                               │   │
//!   │   │    key_a ──────────────────────┐                             │   │
//!   │   │    key_b ────────────┐         │                             │   │
//!   │   │    key_c ──┐         │         │                             │   │
//!   │   └────────────┼─────────┼─────────┼─────────────────────────────┘   │
//!   │                ▼         ▼         ▼                                 │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  RecencyList<Entry<K, V>>  (order, stored in a SlotArena)    │   │
//!   │   │                                                              │   │
//!   │   │  [HEAD] ◄──► [c] ◄──► [b] ◄──► [a] ◄──► [TAIL]               │   │
//!   │   │              MRU                LRU                          │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nodes are linked by [`SlotId`] rather than pointers, and the two sentinel
//! nodes mean linking and unlinking never special-case the ends.
//!
//! ## Operations
//!
//! | Operation         | Effect on order                  | Cost  |
//! |-------------------|----------------------------------|-------|
//! | `get` / `get_mut` | hit moves to MRU                 | O(1)  |
//! | `put` / `insert`  | key moves/lands at MRU; may evict | O(1) |
//! | `peek`            | none                             | O(1)  |
//! | `touch`           | hit moves to MRU                 | O(1)  |
//! | `remove`          | node freed                       | O(1)  |
//! | `pop_lru`         | tail node freed                  | O(1)  |
//! | `recency_rank`    | none                             | O(n)  |
//!
//! ## Eviction
//!
//! ```text
//!   capacity = 3
//!   before:   [HEAD] ◄──► [A] ◄──► [B] ◄──► [C] ◄──► [TAIL]
//!   put(D):   1. C is the LRU, unlink it and drop it from the index
//!             2. link D after HEAD
//!   after:    [HEAD] ◄──► [D] ◄──► [A] ◄──► [B] ◄──► [TAIL]
//! ```
//!
//! ## Thread Safety
//!
//! `LruCache` is single-threaded; every promoting call takes `&mut self`.
//! With the `concurrency` feature, [`ConcurrentLruCache`] wraps it in one
//! `parking_lot::Mutex` so that every operation stays atomic.

use std::fmt;
use std::hash::Hash;
use std::mem;

#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::{RecencyList, SlotId};
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

/// A cached key-value pair, owned by exactly one list node.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity LRU cache backed by a hash index and an arena-allocated,
/// sentinel-bounded recency list.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(2);
/// cache.put(1, "one");
/// cache.put(2, "two");
/// assert_eq!(cache.get(&1), Some(&"one"));
///
/// // key 2 is now least recently used
/// cache.put(3, "three");
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.len(), 2);
/// ```
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to get a
    /// [`ConfigError`] instead.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(_) => panic!("{}", ZERO_CAPACITY),
        }
    }

    /// Creates a cache, rejecting a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_new(0).is_err());
    /// assert_eq!(LruCache::<u32, u32>::try_new(8).unwrap().capacity(), 8);
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = validate_capacity(capacity)?;
        // Reserve lazily for very large capacities; the arena grows on demand.
        let reserve = capacity.min(1 << 16);
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            order: RecencyList::with_capacity(reserve),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks presence without changing recency order.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and leaves the order untouched.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = self.promote(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Mutable variant of [`get`](Self::get); also promotes the key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.promote(key)?;
        self.order.get_mut(id).map(|entry| &mut entry.value)
    }

    fn promote(&mut self, key: &K) -> Option<SlotId> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        Some(id)
    }

    /// Returns the value for `key` without changing recency order.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// assert_eq!(cache.peek(&"a"), Some(&1));
    ///
    /// // "a" is still the LRU entry
    /// cache.put("c", 3);
    /// assert!(!cache.contains(&"a"));
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let &id = self.index.get(key)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        self.order.get(id).map(|entry| &entry.value)
    }

    /// Stores `value` under `key` and marks it most recently used.
    ///
    /// An existing key is updated in place without eviction. A new key
    /// inserted into a full cache evicts the least recently used entry first.
    #[inline]
    pub fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    /// Like [`put`](Self::put), returning the value that was replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            self.order.move_to_front(id);
            return self
                .order
                .get_mut(id)
                .map(|entry| mem::replace(&mut entry.value, value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity {
            self.evict();
        }

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        debug_assert_eq!(self.index.len(), self.order.len());
        debug_assert!(self.index.len() <= self.capacity);
        None
    }

    fn evict(&mut self) {
        if self.pop_tail().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();

            #[cfg(feature = "tracing")]
            tracing::trace!(
                len = self.index.len(),
                capacity = self.capacity,
                "evicted least recently used entry"
            );
        }
    }

    fn pop_tail(&mut self) -> Option<Entry<K, V>> {
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        Some(entry)
    }

    /// Removes `key`, returning its value if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;
        let entry = self.order.remove(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        debug_assert_eq!(self.index.len(), self.order.len());
        Some(entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.pop_tail()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((entry.key, entry.value))
    }

    /// Least recently used entry, without promoting it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Most recently used entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.order.front().map(|entry| (&entry.key, &entry.value))
    }

    /// Promotes `key` without reading it. Returns `false` on a miss.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        self.order.move_to_front(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    /// Position of `key` from the MRU end (0) towards the LRU end.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();

        if !self.index.contains_key(key) {
            return None;
        }

        let rank = self.order.iter().position(|entry| {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();
            entry.key == *key
        });

        #[cfg(feature = "metrics")]
        if rank.is_some() {
            (&self.metrics).record_recency_rank_found();
        }

        rank
    }

    /// Drops every entry; capacity is kept.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.index.clear();
        self.order.clear();
    }

    /// Entries from most to least recently used. Does not promote.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.order.iter().map(|entry| &entry.key)
    }

    /// Verifies that the index and the recency list describe the same set of
    /// entries and that the list is well formed. O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but recency list holds {} nodes",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "cache holds {} entries, over capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        self.order.check_invariants()?;
        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "slot {} holds a different key than its index entry",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index points at vacant slot {}",
                        id.index()
                    )));
                },
            }
        }
        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.index.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for LruCache<K, V> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LruCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with a capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe handle to an [`LruCache`] guarded by a single mutex.
///
/// `get` mutates recency order, so reads and writes take the same lock.
/// Cloning the handle shares the cache.
///
/// ```
/// use lrukit::policy::lru::ConcurrentLruCache;
///
/// let cache = ConcurrentLruCache::new(2);
/// let writer = cache.clone();
/// std::thread::spawn(move || writer.put(1, "one".to_string()))
///     .join()
///     .unwrap();
/// assert_eq!(cache.get(&1).as_deref(), Some("one"));
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentLruCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.index.len())
            .field("capacity", &cache.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(LruCache::new(capacity))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        LruCache::try_new(capacity).map(Self::from_cache)
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    /// Returns a clone of the value and promotes the key.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Returns a clone of the value without promoting the key.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn touch(&self, key: &K) -> bool {
        self.inner.lock().touch(key)
    }

    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lru()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs `f` with the lock held, for compound read-modify-write steps.
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache = ConcurrentLruCache::new(4);
    /// cache.put("hits", 0u32);
    /// cache.with_lock(|c| {
    ///     if let Some(v) = c.get_mut(&"hits") {
    ///         *v += 1;
    ///     }
    /// });
    /// assert_eq!(cache.get(&"hits"), Some(1));
    /// ```
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut LruCache<K, V>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

#[cfg(all(feature = "concurrency", feature = "metrics"))]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }
}

//! Metrics trait hierarchy.
//!
//! ```text
//!              ┌─────────────────────────────┐
//!              │     CoreMetricsRecorder     │
//!              │  get hit/miss, insert,      │
//!              │  evict, clear               │
//!              └──────────────┬──────────────┘
//!                             ▼
//!              ┌─────────────────────────────┐
//!              │     LruMetricsRecorder      │   &mut self paths
//!              │  remove, pop_lru, touch     │
//!              └─────────────────────────────┘
//!              ┌─────────────────────────────┐
//!              │   LruMetricsReadRecorder    │   &self paths
//!              │  peek, recency_rank         │
//!              └─────────────────────────────┘
//!
//!   MetricsSnapshotProvider<S> ──► S ──► MetricsExporter<S>
//! ```

/// Counters shared by every cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// LRU counters recorded from `&mut self` methods.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// LRU counters recorded from `&self` methods (interior mutability).
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Point-in-time read of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Zeroes counters between benchmark iterations or test phases.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Publishes a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}

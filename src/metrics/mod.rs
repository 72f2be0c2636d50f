//! Operation counters for the LRU backends (feature `metrics`).
//!
//! Recording, snapshotting and exporting are split into separate traits:
//! caches write through the recorder traits, callers read a
//! [`LruMetricsSnapshot`](snapshot::LruMetricsSnapshot) through
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider), and an
//! exporter turns a snapshot into a monitoring format.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

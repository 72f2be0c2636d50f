//! lrukit: a fixed-capacity key-value cache with least-recently-used eviction.
//!
//! The main type is [`LruCache`], a hash index over an arena-allocated,
//! sentinel-bounded recency list. [`LinkedLruCache`] offers the same contract
//! on top of `hashlink::LinkedHashMap`, and [`builder::CacheBuilder`] selects
//! between them at runtime.
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let mut cache = LruCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3); // evicts "b"
//! assert!(!cache.contains(&"b"));
//! ```
//!
//! ## Features
//!
//! - `concurrency`: [`policy::lru::ConcurrentLruCache`], a mutex-guarded handle.
//! - `metrics`: per-cache counters, snapshots and a Prometheus text exporter.
//! - `tracing`: `tracing` events on eviction and rejected configuration.

pub mod builder;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;

pub use crate::builder::{Cache, CacheBuilder, LruBackend};
pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;
pub use crate::policy::linked_lru::LinkedLruCache;
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
pub use crate::policy::lru::LruCache;

//! Error types for lrukit.
//!
//! - [`ConfigError`]: a cache was configured with invalid parameters
//!   (zero capacity).
//! - [`InvariantError`]: `check_invariants` found the index and the recency
//!   list out of sync.
//!
//! A missing key is never an error; lookups return `Option`.
//!
//! ```
//! use lrukit::error::ConfigError;
//! use lrukit::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<u64, String>, ConfigError> = LruCache::try_new(8);
//! assert!(cache.is_ok());
//!
//! let bad = LruCache::<u64, String>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

/// Message used for every zero-capacity rejection.
pub(crate) const ZERO_CAPACITY: &str = "cache capacity must be greater than zero";

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` on
/// [`LruCache`](crate::policy::lru::LruCache),
/// [`LinkedLruCache`](crate::policy::linked_lru::LinkedLruCache) and
/// [`RecencyList`](crate::ds::RecencyList).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the description of the failed invariant.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by `try_new` constructors and
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// ```
/// use lrukit::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the description of the rejected parameter.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    pub(crate) fn zero_capacity() -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!("rejecting cache configuration: {}", ZERO_CAPACITY);
        Self::new(ZERO_CAPACITY)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Validates a capacity argument shared by every constructor.
pub(crate) fn validate_capacity(capacity: usize) -> Result<usize, ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::zero_capacity());
    }
    Ok(capacity)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their age-based
//! expiry check.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cached value with its timestamps.
///
/// Entries are owned exclusively by the cache; reads hand out clones of the
/// value. The maximum age is cache-wide configuration, so the entry carries
/// timestamps only and the expiry check receives the limit from the store.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds); reset on overwrite
    pub inserted_at: u64,
    /// Last successful lookup timestamp (Unix milliseconds)
    pub last_accessed_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: V) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            inserted_at: now,
            last_accessed_at: now,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry's age exceeds the given maximum.
    ///
    /// Expiry is a pure function of wall-clock time at call time: an entry
    /// is expired once `now - inserted_at` is strictly greater than
    /// `max_age`. `None` means entries never expire.
    pub fn is_expired(&self, max_age: Option<Duration>) -> bool {
        match max_age {
            Some(limit) => self.age_ms() > limit.as_millis() as u64,
            None => false,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since insertion (or since the last overwrite).
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.inserted_at)
    }

    // == Touch ==
    /// Records a successful lookup.
    pub fn touch(&mut self) {
        self.last_accessed_at = current_timestamp_ms();
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

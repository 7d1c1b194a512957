//! Cache Statistics Module
//!
//! Tracks cache performance counters: hits, misses, evictions and expiries.

use serde::Serialize;

// == Cache Stats ==
/// Performance counters for a cache instance.
///
/// Serializable so a host can surface them on its own observability
/// endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups that returned a value
    pub hits: u64,
    /// Number of lookups that found nothing (absent or expired)
    pub misses: u64,
    /// Number of entries removed to make room under the capacity limit
    pub evictions: u64,
    /// Number of entries dropped because their age exceeded the maximum
    pub expirations: u64,
    /// Current number of live (non-expired) entries
    pub live_entries: usize,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Hits as a fraction of all lookups, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    /// Updates the live entry count.
    pub fn set_live_entries(&mut self, count: usize) {
        self.live_entries = count;
    }
}

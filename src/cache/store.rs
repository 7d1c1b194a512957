//! Cache Store Module
//!
//! The bounded TTL cache: HashMap storage combined with LRU recency
//! tracking and age-based expiry.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Capacity-limited, time-expiring cache for rendered output.
///
/// Values are opaque to the cache and handed out by clone; deriving the key
/// that uniquely determines a value is entirely the caller's job. Expired
/// entries are purged lazily on lookup, so a periodic [`sweep_expired`]
/// call is only needed for memory reclamation, never for correctness.
///
/// [`sweep_expired`]: CacheStore::sweep_expired
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Maximum entry age, None = entries never expire
    max_age: Option<Duration>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and maximum age.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `max_entries` is zero.
    pub fn new(max_entries: usize, max_age: Option<Duration>) -> Result<Self> {
        if max_entries == 0 {
            return Err(CacheError::InvalidCapacity);
        }

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            max_age,
        })
    }

    /// Creates a new CacheStore from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.max_entries, config.max_age())
    }

    // == Get ==
    /// Retrieves a value by key, marking the entry most recently used.
    ///
    /// Returns `None` for absent or expired keys; a miss is normal control
    /// flow, not an error. An expired entry found here is purged on the
    /// spot.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired(self.max_age) {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.touch();
        let value = entry.value.clone();
        self.lru.touch(key);
        self.stats.record_hit();
        Some(value)
    }

    // == Set ==
    /// Stores a value under `key`, overwriting any previous value and
    /// resetting its insertion time.
    ///
    /// When a new key would push the cache over capacity, expired entries
    /// are dropped first; if the cache is still full, the least recently
    /// used entry is evicted. Never fails.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            self.sweep_expired();
            if self.entries.len() >= self.max_entries {
                if let Some(victim) = self.lru.pop_oldest() {
                    self.entries.remove(&victim);
                    self.stats.record_eviction();
                }
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value));
        self.lru.touch(&key);
    }

    // == Has ==
    /// True iff `get` would return a value, without disturbing recency
    /// order or statistics. Safe to call any number of times.
    pub fn has(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map_or(false, |entry| !entry.is_expired(self.max_age))
    }

    // == Delete ==
    /// Removes the entry if present. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            true
        } else {
            false
        }
    }

    // == Sweep Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.max_age))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
        }

        expired_keys.len()
    }

    // == Length ==
    /// Number of currently-live (non-expired) entries.
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| !entry.is_expired(self.max_age))
            .count()
    }

    /// True when no live entries remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Stats ==
    /// Snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_live_entries(self.len());
        stats
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// The configured maximum entry age.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }
}

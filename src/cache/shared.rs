//! Shared Cache Handle
//!
//! Cloneable handle wrapping the store for concurrent use. The process-wide
//! cache is constructed once at startup and handed into the request layer
//! as an explicit dependency, never looked up through a global.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::Result;

// == Shared Cache ==
/// Thread-safe handle to a [`CacheStore`].
///
/// Every clone points at the same store. Each operation takes the lock only
/// for the map operation itself, so lookups and stores never block on a
/// concurrent render: the check-then-render-then-store sequence around a
/// miss deliberately releases the lock for the render step. Two concurrent
/// misses for the same key may therefore both render and both store; the
/// duplicate work is accepted and bounded by the configured max age.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    /// Wraps a store in a shareable handle.
    pub fn new(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Builds the store from configuration and wraps it.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Ok(Self::new(CacheStore::from_config(config)?))
    }

    /// Convenience constructor mirroring [`CacheStore::new`].
    pub fn with_capacity(max_entries: usize, max_age: Option<Duration>) -> Result<Self> {
        Ok(Self::new(CacheStore::new(max_entries, max_age)?))
    }

    /// Looks up a value. Takes the write lock: a hit updates recency.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.write().await.get(key)
    }

    /// Stores a value under `key`.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        self.inner.write().await.set(key, value);
    }

    /// Presence check without recency side effects.
    pub async fn has(&self, key: &str) -> bool {
        self.inner.read().await.has(key)
    }

    /// Removes an entry. Returns whether anything was removed.
    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    /// Count of live entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// True when no live entries remain.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Drops all expired entries, returning how many were removed.
    pub async fn sweep_expired(&self) -> usize {
        self.inner.write().await.sweep_expired()
    }

    /// Snapshot of the statistics.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }
}

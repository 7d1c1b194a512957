//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.
//! Lookups already purge expired entries lazily, so the sweep exists for
//! memory reclamation only; skipping it never affects correctness.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task sleeps for `interval` between sweeps and takes the write lock
/// only for the sweep itself.
///
/// # Returns
/// A JoinHandle for the spawned task; abort it during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = SharedCache::with_capacity(1000, Some(Duration::from_secs(1)))?;
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V>(cache: SharedCache<V>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep_expired().await;

            if removed > 0 {
                info!(removed, "expiry sweep removed entries");
            } else {
                debug!("expiry sweep found no expired entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweep_task_reclaims_expired_entries() {
        let cache: SharedCache<String> =
            SharedCache::with_capacity(100, Some(Duration::from_millis(50))).unwrap();

        cache.set("expire_soon", "value".to_string()).await;

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(30));

        // Wait for the entry to expire and a sweep to run
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.len().await, 0);
        let stats = cache.stats().await;
        assert!(stats.expirations >= 1, "sweep should have recorded the expiry");

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_live_entries() {
        let cache: SharedCache<String> =
            SharedCache::with_capacity(100, Some(Duration::from_secs(60))).unwrap();

        cache.set("long_lived", "value".to_string()).await;

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(30));

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(cache.get("long_lived").await.as_deref(), Some("value"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let cache: SharedCache<String> = SharedCache::with_capacity(100, None).unwrap();

        let handle = spawn_sweep_task(cache, Duration::from_millis(30));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished(), "task should be finished after abort");
    }
}

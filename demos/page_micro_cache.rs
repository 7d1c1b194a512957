//! Page micro-caching demo
//!
//! Simulates a traffic burst against a slow render function and shows the
//! cache collapsing it to a handful of renders. Run with:
//! `cargo run --example page_micro_cache`

use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use microcache::{spawn_sweep_task, CacheConfig, PageCache, PageRequest, SharedCache};

#[tokio::main]
async fn main() -> Result<(), microcache::CacheError> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "microcache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    info!(
        max_entries = config.max_entries,
        max_age_ms = config.max_age_ms,
        sweep_interval_secs = config.sweep_interval_secs,
        "configuration loaded"
    );

    let cache: SharedCache<String> = SharedCache::from_config(&config)?;
    let pages = PageCache::new(cache.clone());

    let sweep_handle = spawn_sweep_task(cache.clone(), config.sweep_interval());
    info!("expiry sweep task started");

    // A burst of identical requests; only the first pays the render cost
    let request = PageRequest::get("/front-page").with_query("edition", "morning");
    for n in 0..50u32 {
        let body = pages
            .respond_with(&request, || async {
                // Stand-in for a real template render
                tokio::time::sleep(Duration::from_millis(40)).await;
                "<html><body>front page</body></html>".to_string()
            })
            .await;
        if n == 0 {
            info!(bytes = body.len(), "first response rendered");
        }
    }

    let stats = cache.stats().await;
    info!(
        hits = stats.hits,
        misses = stats.misses,
        hit_rate = stats.hit_rate(),
        "burst served"
    );

    // Session-bound traffic bypasses the cache entirely
    let personalized = PageRequest::get("/account").with_session();
    pages
        .respond_with(&personalized, || async { "<html>account</html>".to_string() })
        .await;
    info!(live_entries = cache.len().await, "session request left the cache untouched");

    sweep_handle.abort();
    Ok(())
}

//! Page Micro-Caching Policy
//!
//! Caches whole rendered responses for a very short time to absorb traffic
//! bursts. A request is only considered when the classification predicate
//! accepts it; the cache key is a canonical identifier derived from the
//! request so equivalent URLs collapse to one entry.

use std::future::Future;

use tracing::debug;

use crate::cache::SharedCache;

// == Page Request ==
/// Minimal request descriptor the policy needs from the host dispatcher.
///
/// The real request type belongs to the host; it hands over only the fields
/// that decide cacheability and form the key.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// HTTP-style method name
    pub method: String,
    /// Request path
    pub path: String,
    /// Query parameters in arrival order
    pub query: Vec<(String, String)>,
    /// Whether the response depends on per-user or session state
    pub session_bound: bool,
}

impl PageRequest {
    /// Creates a GET request for `path` with no query and no session.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            path: path.into(),
            query: Vec::new(),
            session_bound: false,
        }
    }

    /// Adds a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Marks the request as depending on session state.
    pub fn with_session(mut self) -> Self {
        self.session_bound = true;
        self
    }
}

// == Cacheability Predicate ==
/// Whether a request may be served from the page cache.
///
/// Only side-effect-free reads whose output is independent of per-user
/// state qualify; everything else bypasses the cache entirely.
pub fn is_cacheable(req: &PageRequest) -> bool {
    req.method.eq_ignore_ascii_case("GET") && !req.session_bound
}

// == Canonical Key ==
/// Canonical cache key for a request.
///
/// Normalizes away representation noise so equivalent URLs share an entry:
/// trailing slashes are trimmed (the root path stays `/`) and query
/// parameters are sorted before joining.
pub fn canonical_key(req: &PageRequest) -> String {
    let trimmed = req.path.trim_end_matches('/');
    let path = if trimmed.is_empty() { "/" } else { trimmed };

    if req.query.is_empty() {
        return path.to_string();
    }

    let mut pairs = req.query.clone();
    pairs.sort();
    let query: Vec<String> = pairs
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();

    format!("{}?{}", path, query.join("&"))
}

// == Page Cache ==
/// Request-level micro-cache bracketing a render step.
#[derive(Debug, Clone)]
pub struct PageCache<V> {
    cache: SharedCache<V>,
}

impl<V: Clone> PageCache<V> {
    /// Wraps a shared cache in the page policy.
    pub fn new(cache: SharedCache<V>) -> Self {
        Self { cache }
    }

    /// The underlying shared cache.
    pub fn shared(&self) -> &SharedCache<V> {
        &self.cache
    }

    /// Serves `req` from the cache, rendering on a miss.
    ///
    /// Uncacheable requests are rendered directly and never stored. The
    /// lock is not held across the render, so two concurrent misses for
    /// the same key may both render and both store; the duplicate work is
    /// an accepted trade-off bounded by the configured max age.
    pub async fn respond_with<F, Fut>(&self, req: &PageRequest, render: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if !is_cacheable(req) {
            return render().await;
        }

        let key = canonical_key(req);
        if let Some(page) = self.cache.get(&key).await {
            debug!(key = %key, "page cache hit");
            return page;
        }

        debug!(key = %key, "page cache miss, rendering");
        let page = render().await;
        self.cache.set(key, page.clone()).await;
        page
    }
}

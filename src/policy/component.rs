//! Component Render Caching Policy
//!
//! Caches the rendered form of individual units (components) keyed by data
//! derived from their input. Each unit supplies its own key derivation
//! behind [`CacheKeySource`]; the policy namespaces every key with the
//! unit's id so two unit types can never collide on the same key space.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::debug;

use crate::cache::SharedCache;

// == Cache Key Source ==
/// Capability a cacheable unit implements to take part in render caching.
///
/// # Contract
/// The derived key must fully determine the unit's rendered output for the
/// given input: any input change that alters the output must change the
/// key. The cache cannot detect a violation; one manifests as stale reuse
/// of the previously rendered form, not as a cache error. For units that
/// render a persisted record, [`record_key`] gives the recommended shape.
pub trait CacheKeySource {
    /// The unit's input data (its props).
    type Input;

    /// Identifier unique among all cacheable unit types.
    fn unique_id(&self) -> &str;

    /// Derives the cache key for one input.
    fn derive_key(&self, input: &Self::Input) -> String;
}

// == Key Helpers ==
/// Key for a unit rendering a persisted record: `"<id>::<last_modified>"`.
///
/// Any update that bumps the record's modification stamp changes the key,
/// so the cached form invalidates automatically.
pub fn record_key(id: impl Display, last_modified: impl Display) -> String {
    format!("{id}::{last_modified}")
}

static UNSERIALIZABLE: AtomicU64 = AtomicU64::new(0);

/// Derives a key from any serializable input by JSON-encoding it.
///
/// On the rare serializer failure the fallback key embeds a process-unique
/// counter: a shared fallback could alias two different inputs, while a
/// unique one can only force a miss.
pub fn json_key<T: Serialize>(input: &T) -> String {
    serde_json::to_string(input).unwrap_or_else(|_| {
        format!(
            "unserializable:{}",
            UNSERIALIZABLE.fetch_add(1, Ordering::Relaxed)
        )
    })
}

// == Component Cache ==
/// Unit-level render cache over a shared store.
#[derive(Debug, Clone)]
pub struct ComponentCache<V> {
    cache: SharedCache<V>,
}

impl<V: Clone> ComponentCache<V> {
    /// Wraps a shared cache in the component policy.
    pub fn new(cache: SharedCache<V>) -> Self {
        Self { cache }
    }

    /// The underlying shared cache.
    pub fn shared(&self) -> &SharedCache<V> {
        &self.cache
    }

    /// Full storage key for a unit and input: unit id and derived key
    /// joined so unit key spaces stay disjoint.
    fn namespaced_key<S: CacheKeySource>(source: &S, input: &S::Input) -> String {
        format!("{}::{}", source.unique_id(), source.derive_key(input))
    }

    /// Looks up the cached rendered form for `input`.
    pub async fn get<S: CacheKeySource>(&self, source: &S, input: &S::Input) -> Option<V> {
        self.cache.get(&Self::namespaced_key(source, input)).await
    }

    /// Stores the rendered form for `input`.
    pub async fn store<S: CacheKeySource>(&self, source: &S, input: &S::Input, value: V) {
        self.cache
            .set(Self::namespaced_key(source, input), value)
            .await;
    }

    /// Serves the unit from the cache, rendering on a miss.
    pub async fn fetch_or_render<S, F, Fut>(&self, source: &S, input: &S::Input, render: F) -> V
    where
        S: CacheKeySource,
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let key = Self::namespaced_key(source, input);
        if let Some(rendered) = self.cache.get(&key).await {
            debug!(key = %key, "component cache hit");
            return rendered;
        }

        debug!(key = %key, "component cache miss, rendering");
        let rendered = render().await;
        self.cache.set(key, rendered.clone()).await;
        rendered
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    struct Item {
        id: u64,
        last_updated: u64,
    }

    /// List-row unit keyed by record id and modification stamp.
    struct ListItem;

    impl CacheKeySource for ListItem {
        type Input = Item;

        fn unique_id(&self) -> &str {
            "list_item"
        }

        fn derive_key(&self, input: &Item) -> String {
            record_key(input.id, input.last_updated)
        }
    }

    /// A second unit type that happens to derive identical keys.
    struct DetailPanel;

    impl CacheKeySource for DetailPanel {
        type Input = Item;

        fn unique_id(&self) -> &str {
            "detail_panel"
        }

        fn derive_key(&self, input: &Item) -> String {
            record_key(input.id, input.last_updated)
        }
    }

    fn component_cache() -> ComponentCache<String> {
        ComponentCache::new(SharedCache::with_capacity(16, None).unwrap())
    }

    #[test]
    fn test_record_key_shape() {
        assert_eq!(record_key(5, 100), "5::100");
        assert_eq!(record_key("user-7", 1234), "user-7::1234");
    }

    #[test]
    fn test_same_input_derives_same_key() {
        let unit = ListItem;
        let a = unit.derive_key(&Item { id: 5, last_updated: 100 });
        let b = unit.derive_key(&Item { id: 5, last_updated: 100 });
        assert_eq!(a, b);
    }

    #[test]
    fn test_record_update_changes_key() {
        let unit = ListItem;
        let before = unit.derive_key(&Item { id: 5, last_updated: 100 });
        let after = unit.derive_key(&Item { id: 5, last_updated: 101 });
        assert_ne!(before, after);
    }

    #[test]
    fn test_json_key_is_deterministic() {
        #[derive(Serialize)]
        struct Props {
            id: u64,
            title: String,
        }

        let a = Props { id: 1, title: "hello".to_string() };
        let b = Props { id: 1, title: "hello".to_string() };
        let c = Props { id: 2, title: "hello".to_string() };

        assert_eq!(json_key(&a), json_key(&b));
        assert_ne!(json_key(&a), json_key(&c));
    }

    #[tokio::test]
    async fn test_unit_ids_keep_key_spaces_disjoint() {
        let cache = component_cache();
        let item = Item { id: 5, last_updated: 100 };

        cache.store(&ListItem, &item, "<li>item 5</li>".to_string()).await;

        // Same derived key, different unit: must not observe the row markup
        assert_eq!(cache.get(&DetailPanel, &item).await, None);
        assert_eq!(
            cache.get(&ListItem, &item).await.as_deref(),
            Some("<li>item 5</li>")
        );
    }

    #[tokio::test]
    async fn test_fetch_or_render_caches_per_derived_key() {
        let cache = component_cache();
        let renders = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let renders = renders.clone();
            let markup = cache
                .fetch_or_render(
                    &ListItem,
                    &Item { id: 5, last_updated: 100 },
                    move || async move {
                        renders.fetch_add(1, Ordering::SeqCst);
                        "<li>item 5</li>".to_string()
                    },
                )
                .await;
            assert_eq!(markup, "<li>item 5</li>");
        }
        assert_eq!(renders.load(Ordering::SeqCst), 1);

        // Bumping the modification stamp forces a miss and a re-render
        let renders_after = renders.clone();
        cache
            .fetch_or_render(
                &ListItem,
                &Item { id: 5, last_updated: 101 },
                move || async move {
                    renders_after.fetch_add(1, Ordering::SeqCst);
                    "<li>item 5 v2</li>".to_string()
                },
            )
            .await;
        assert_eq!(renders.load(Ordering::SeqCst), 2);
    }
}

//! Cache Module
//!
//! The bounded TTL cache primitive: capacity-limited storage with LRU
//! eviction, age-based expiry and a shared handle for concurrent use.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use lru::LruTracker;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;

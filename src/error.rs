//! Error types for the cache library
//!
//! Only construction can fail. Every operation on a constructed cache is
//! infallible: a miss is a normal `None` result, never an error, and the
//! cache degrades to "always miss" rather than surfacing faults to the
//! render path.

use thiserror::Error;

// == Cache Error Enum ==
/// Misconfiguration detected when building a cache.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity of zero would make every store a no-op
    #[error("invalid capacity: max_entries must be at least 1")]
    InvalidCapacity,
}

// == Result Type Alias ==
/// Convenience Result type for cache construction.
pub type Result<T> = std::result::Result<T, CacheError>;

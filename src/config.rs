//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with defaults
/// tuned for page micro-caching: a short max age absorbs traffic bursts
/// while keeping staleness bounded to about a second.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Maximum entry age in milliseconds, None = entries never expire
    pub max_age_ms: Option<u64>,
    /// Background expiry sweep interval in seconds
    pub sweep_interval_secs: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MICROCACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `MICROCACHE_MAX_AGE_MS` - Maximum entry age in milliseconds
    ///   (default: 1000; 0 disables expiry)
    /// - `MICROCACHE_SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("MICROCACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            max_age_ms: env::var("MICROCACHE_MAX_AGE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(Some(1000), |ms| if ms == 0 { None } else { Some(ms) }),
            sweep_interval_secs: env::var("MICROCACHE_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    /// Maximum entry age as a Duration, None = no expiry.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age_ms.map(Duration::from_millis)
    }

    /// Sweep interval as a Duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            max_age_ms: Some(1000),
            sweep_interval_secs: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.max_age_ms, Some(1000));
        assert_eq!(config.sweep_interval_secs, 1);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("MICROCACHE_MAX_ENTRIES");
        env::remove_var("MICROCACHE_MAX_AGE_MS");
        env::remove_var("MICROCACHE_SWEEP_INTERVAL_SECS");

        let config = CacheConfig::from_env();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.max_age_ms, Some(1000));
        assert_eq!(config.sweep_interval_secs, 1);
    }

    #[test]
    fn test_config_duration_conversions() {
        let config = CacheConfig {
            max_entries: 10,
            max_age_ms: Some(250),
            sweep_interval_secs: 5,
        };
        assert_eq!(config.max_age(), Some(Duration::from_millis(250)));
        assert_eq!(config.sweep_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_no_expiry() {
        let config = CacheConfig {
            max_entries: 10,
            max_age_ms: None,
            sweep_interval_secs: 1,
        };
        assert_eq!(config.max_age(), None);
    }
}

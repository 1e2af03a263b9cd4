//! Configuration Module
//!
//! Handles loading service configuration from environment variables and
//! deriving the cache construction settings from it.

use std::env;
use std::time::Duration;

use crate::cache::{
    RetryPolicy, DEFAULT_KEY_PREFIX, DEFAULT_REDIS_PORT, LOCAL_CACHE_SIZE, LOCAL_SWEEP_INTERVAL,
    REDIS_CONNECT_TIMEOUT, REDIS_RESPONSE_TIMEOUT,
};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis host; empty selects the in-process fallback store
    pub redis_host: String,
    /// Redis port
    pub redis_port: u16,
    /// Namespace prefix applied to every cache key
    pub key_prefix: String,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_HOST` - Redis host (default: empty, local store)
    /// - `REDIS_PORT` - Redis port (default: 6379)
    /// - `CACHE_KEY_PREFIX` - Key namespace (default: "poc")
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            redis_host: env::var("REDIS_HOST")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.redis_host),
            redis_port: env::var("REDIS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.redis_port),
            key_prefix: env::var("CACHE_KEY_PREFIX")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.key_prefix),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Cache construction settings derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            host: self.redis_host.clone(),
            port: self.redis_port,
            key_prefix: self.key_prefix.clone(),
            ..CacheConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_host: String::new(),
            redis_port: DEFAULT_REDIS_PORT,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            server_port: 3000,
        }
    }
}

/// Settings consumed by [`crate::cache::Cache::from_config`].
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis host; empty selects the local store
    pub host: String,
    pub port: u16,
    pub key_prefix: String,
    /// Capacity of the local store
    pub local_capacity: usize,
    /// Interval between expired-entry sweeps of the local store
    pub sweep_interval: Duration,
    /// Bound on establishing a redis connection
    pub connect_timeout: Duration,
    /// Bound on each redis command
    pub response_timeout: Duration,
    pub retry: RetryPolicy,
}

impl CacheConfig {
    /// Settings for the given host with every other value at its default.
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Whether these settings select the remote store.
    pub fn uses_remote(&self) -> bool {
        !self.host.trim().is_empty()
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_REDIS_PORT,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            local_capacity: LOCAL_CACHE_SIZE,
            sweep_interval: LOCAL_SWEEP_INTERVAL,
            connect_timeout: REDIS_CONNECT_TIMEOUT,
            response_timeout: REDIS_RESPONSE_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

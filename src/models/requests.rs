//! Request DTOs for the HTTP API
//!
//! Defines the structure of incoming request bodies and query strings.

use std::time::Duration;

use serde::Deserialize;

/// Request body for `PUT /cache/:key`
///
/// # Fields
/// - `value`: Any JSON value to store
/// - `ttl`: Optional TTL in seconds (absent or 0 uses the cache default)
/// - `retry`: Whether to retry failed writes (default: false)
#[derive(Debug, Clone, Deserialize)]
pub struct PutValueRequest {
    pub value: serde_json::Value,
    #[serde(default)]
    pub ttl: Option<u64>,
    #[serde(default)]
    pub retry: bool,
}

impl PutValueRequest {
    /// Expiration to hand to the cache; zero selects the default.
    pub fn expiration(&self) -> Duration {
        Duration::from_secs(self.ttl.unwrap_or(0))
    }
}

/// Query string for `GET /cache/:key`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadQuery {
    #[serde(default)]
    pub retry: bool,
}

/// Validates a logical cache key taken from the path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.trim().is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > 256 {
        return Some("Key exceeds maximum length of 256 characters".to_string());
    }
    None
}

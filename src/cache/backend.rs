//! Backend Module
//!
//! The byte-level store behind a [`crate::cache::Cache`].

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// A key-value store holding already-encoded values.
///
/// Keys reach a backend fully namespaced. Implementations must be safe to
/// share between concurrent callers; the cache adds no locking of its own.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Reads the bytes stored under `key`.
    ///
    /// Returns `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key` for `ttl`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;
}

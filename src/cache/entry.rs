//! Cache Entry Module
//!
//! Defines the structure for individual local-store entries.

use std::time::Duration;

use tokio::time::Instant;

use crate::cache::MAX_LOCAL_TTL;

// == Cache Entry ==
/// A single encoded value with its expiration deadline.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The encoded value
    pub value: Vec<u8>,
    /// When the entry stops being readable
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now, capped at [`MAX_LOCAL_TTL`].
    pub fn new(value: Vec<u8>, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl.min(MAX_LOCAL_TTL),
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

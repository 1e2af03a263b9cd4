//! Cache Module
//!
//! A uniform get/set interface over either a Redis server or an in-process
//! fallback store, with retries, key namespacing and pluggable serialization.

mod backend;
mod client;
mod codec;
mod entry;
mod local;
mod lru;
mod remote;
mod retry;


use std::time::Duration;

// Re-export public types
pub use backend::Backend;
pub use client::{effective_expiration, Cache};
pub use codec::{Codec, MsgPackCodec};
pub use entry::CacheEntry;
pub use local::{LocalState, LocalStore};
pub use lru::LruTracker;
pub use remote::RedisStore;
pub use retry::RetryPolicy;

// == Public Constants ==
/// Port redis listens on by default.
pub const DEFAULT_REDIS_PORT: u16 = 6379;

/// Namespace prepended to every key. Redis is shared across services, so
/// each one keeps its own prefix.
pub const DEFAULT_KEY_PREFIX: &str = "poc";

/// Capacity of the local store used when no redis host is configured.
pub const LOCAL_CACHE_SIZE: usize = 5000;

/// Interval between expired-entry sweeps of the local store.
pub const LOCAL_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Longest lifetime a local entry can have. Larger expirations are clamped
/// so the deadline stays representable.
pub const MAX_LOCAL_TTL: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// Time allowed for establishing a redis connection.
pub const REDIS_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Time allowed for a single redis command to answer.
pub const REDIS_RESPONSE_TIMEOUT: Duration = Duration::from_secs(3);

/// Expiration applied when a caller passes a zero duration.
pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(2 * 60 * 60);

/// Attempts made by a retrying operation before giving up.
pub const DEFAULT_RETRIES: u32 = 10;

//! Local Store Module
//!
//! Bounded in-process backend used when no redis host is configured.
//! Combines HashMap storage with LRU eviction and TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{Backend, CacheEntry, LruTracker};
use crate::error::Result;
use crate::tasks::spawn_sweep_task;

// == Local State ==
/// Entries and recency order guarded by the store's lock.
#[derive(Debug)]
pub struct LocalState {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    capacity: usize,
}

impl LocalState {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            capacity: capacity.max(1),
        }
    }

    // == Get ==
    /// Returns the value if present and not expired.
    ///
    /// Expired entries are removed on the way out.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        let entry = self.entries.get(key)?;
        if entry.is_expired() {
            self.entries.remove(key);
            self.lru.remove(key);
            return None;
        }

        debug!(key, ttl_remaining = ?entry.ttl_remaining(), "local cache hit");
        let value = entry.value.clone();
        self.lru.touch(key);
        Some(value)
    }

    // == Insert ==
    /// Stores a value, evicting the least recently used key when a new key
    /// would exceed capacity. Overwrites reset the TTL and never evict.
    pub fn insert(&mut self, key: &str, value: Vec<u8>, ttl: Duration) {
        if !self.entries.contains_key(key) && self.entries.len() >= self.capacity {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                debug!(key = %evicted, "local cache evicted least recently used key");
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        self.lru.touch(key);
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        expired.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// == Local Store ==
/// In-process [`Backend`] with a fixed capacity and a periodic sweep of
/// expired entries.
#[derive(Debug)]
pub struct LocalStore {
    state: Arc<RwLock<LocalState>>,
    sweeper: Option<JoinHandle<()>>,
}

impl LocalStore {
    // == Constructor ==
    /// Creates a store holding at most `capacity` entries.
    ///
    /// The sweep task is only started when called inside a tokio runtime;
    /// without one, expired entries are still dropped when read.
    pub fn new(capacity: usize, sweep_interval: Duration) -> Self {
        let state = Arc::new(RwLock::new(LocalState::new(capacity)));
        let sweeper = tokio::runtime::Handle::try_current()
            .ok()
            .map(|_| spawn_sweep_task(Arc::downgrade(&state), sweep_interval));

        Self { state, sweeper }
    }
}

impl Drop for LocalStore {
    fn drop(&mut self) {
        if let Some(handle) = self.sweeper.take() {
            handle.abort();
        }
    }
}

#[async_trait]
impl Backend for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: reads refresh recency and may drop an expired entry
        Ok(self.state.write().await.get(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        self.state.write().await.insert(key, value, ttl);
        Ok(())
    }
}

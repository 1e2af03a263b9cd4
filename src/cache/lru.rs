//! LRU Tracker Module
//!
//! Recency ordering for local-store eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// Every touch stamps the key with a fresh sequence number; the smallest
/// live stamp is the least recently used key.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Key to its latest stamp
    stamps: HashMap<String, u64>,
    /// Stamp to key, oldest first
    order: BTreeMap<u64, String>,
    next: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, tracking it if new.
    pub fn touch(&mut self, key: &str) {
        let stamp = self.next;
        self.next += 1;

        if let Some(old) = self.stamps.insert(key.to_string(), stamp) {
            self.order.remove(&old);
        }
        self.order.insert(stamp, key.to_string());
    }

    // == Remove ==
    /// Stops tracking a key.
    pub fn remove(&mut self, key: &str) {
        if let Some(stamp) = self.stamps.remove(key) {
            self.order.remove(&stamp);
        }
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.stamps.remove(&key);
        Some(key)
    }
}

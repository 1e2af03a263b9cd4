//! Cache Client Module
//!
//! Typed, namespaced, retrying get/set over a [`Backend`].

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::cache::{
    Backend, Codec, LocalStore, MsgPackCodec, RedisStore, RetryPolicy, DEFAULT_EXPIRATION,
    DEFAULT_KEY_PREFIX,
};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache ==
/// Handle to the service cache.
///
/// Cloning is cheap and every clone shares the same backend. The backend is
/// chosen once at construction and never changes afterwards.
///
/// ```ignore
/// let cache = Cache::new("")?; // no host: in-process store
/// cache.set("x", &42, Duration::ZERO, false).await?;
/// let x: i32 = cache.get("x", false).await?;
/// ```
pub struct Cache<C = MsgPackCodec> {
    backend: Arc<dyn Backend>,
    codec: Arc<C>,
    prefix: Arc<str>,
    retry: RetryPolicy,
}

impl<C> Clone for Cache<C> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            codec: Arc::clone(&self.codec),
            prefix: Arc::clone(&self.prefix),
            retry: self.retry.clone(),
        }
    }
}

impl Cache<MsgPackCodec> {
    /// Connects to redis at `host:6379`, or uses the in-process store when
    /// `host` is empty.
    pub fn new(host: &str) -> Result<Self> {
        Self::from_config(&CacheConfig::for_host(host))
    }

    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::from_config_with_codec(config, MsgPackCodec)
    }
}

impl<C: Codec> Cache<C> {
    /// Builds the backend selected by `config` and wraps it.
    pub fn from_config_with_codec(config: &CacheConfig, codec: C) -> Result<Self> {
        let backend: Arc<dyn Backend> = if config.uses_remote() {
            let store = RedisStore::new(&config.host, config.port)?
                .with_timeouts(config.connect_timeout, config.response_timeout);
            info!(address = store.address(), "using redis cache");
            Arc::new(store)
        } else {
            info!(
                capacity = config.local_capacity,
                sweep_interval = ?config.sweep_interval,
                "no redis host configured, using local cache"
            );
            Arc::new(LocalStore::new(config.local_capacity, config.sweep_interval))
        };

        Ok(Self::with_backend(backend, codec)
            .with_prefix(config.key_prefix.as_str())
            .with_retry_policy(config.retry.clone()))
    }

    /// Wraps an existing backend with the default prefix and retry policy.
    pub fn with_backend(backend: Arc<dyn Backend>, codec: C) -> Self {
        Self {
            backend,
            codec: Arc::new(codec),
            prefix: Arc::from(DEFAULT_KEY_PREFIX),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Arc::from(prefix);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The key as stored in the backend: `<prefix>/<key>`.
    pub fn namespaced(&self, key: &str) -> String {
        format!("{}/{}", self.prefix, key)
    }

    // == Get ==
    /// Reads and decodes the value stored under `key`.
    ///
    /// Returns [`CacheError::Miss`] if there is none. With `retry`, backend
    /// failures are attempted again up to the policy ceiling; a miss or a
    /// decode failure is returned at once.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, retry: bool) -> Result<T> {
        let full_key = self.namespaced(key);
        let backend = &self.backend;
        let stored = full_key.as_str();

        let bytes = self
            .retry
            .execute("get", key, retry, || async move {
                backend.get(stored).await?.ok_or(CacheError::Miss)
            })
            .await?;

        self.codec.decode(&bytes)
    }

    /// Like [`Cache::get`], writing into `value`. On error `value` is left as is.
    pub async fn get_into<T: DeserializeOwned>(
        &self,
        key: &str,
        value: &mut T,
        retry: bool,
    ) -> Result<()> {
        *value = self.get(key, retry).await?;
        Ok(())
    }

    // == Set ==
    /// Encodes `value` and stores it under `key`.
    ///
    /// A zero `expiration` means [`DEFAULT_EXPIRATION`]. With `retry`, every
    /// backend failure is attempted again up to the policy ceiling.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        expiration: Duration,
        retry: bool,
    ) -> Result<()> {
        let bytes = self.codec.encode(value)?;
        let ttl = effective_expiration(expiration);
        let full_key = self.namespaced(key);
        let backend = &self.backend;
        let stored = full_key.as_str();
        let bytes = &bytes;

        self.retry
            .execute("set", key, retry, || async move {
                backend.set(stored, bytes.clone(), ttl).await
            })
            .await
    }
}

/// Maps a zero expiration to [`DEFAULT_EXPIRATION`].
pub fn effective_expiration(expiration: Duration) -> Duration {
    if expiration.is_zero() {
        DEFAULT_EXPIRATION
    } else {
        expiration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Map-backed store that remembers the TTL of every write.
    #[derive(Default)]
    struct RecordingBackend {
        data: Mutex<HashMap<String, (Vec<u8>, Duration)>>,
    }

    impl RecordingBackend {
        fn ttl_of(&self, key: &str) -> Option<Duration> {
            self.data.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
        }

        fn keys(&self) -> Vec<String> {
            self.data.lock().unwrap().keys().cloned().collect()
        }
    }

    #[async_trait]
    impl Backend for RecordingBackend {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            Ok(self.data.lock().unwrap().get(key).map(|(v, _)| v.clone()))
        }

        async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
            self.data
                .lock()
                .unwrap()
                .insert(key.to_string(), (value, ttl));
            Ok(())
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        visits: u32,
    }

    fn recording_cache() -> (Arc<RecordingBackend>, Cache) {
        let backend = Arc::new(RecordingBackend::default());
        let cache = Cache::with_backend(backend.clone(), MsgPackCodec);
        (backend, cache)
    }

    #[tokio::test]
    async fn test_empty_host_scenario() {
        let cache = Cache::new("").unwrap();
        assert_eq!(cache.backend_name(), "local");

        cache.set("x", &42, Duration::ZERO, false).await.unwrap();

        let x: i32 = cache.get("x", false).await.unwrap();
        assert_eq!(x, 42);
        assert!(matches!(
            cache.get::<i32>("y", false).await,
            Err(CacheError::Miss)
        ));
    }

    #[tokio::test]
    async fn test_host_selects_redis() {
        let cache = Cache::new("10.180.141.36").unwrap();
        assert_eq!(cache.backend_name(), "redis");
        assert_eq!(cache.prefix(), "poc");
    }

    #[tokio::test]
    async fn test_struct_roundtrip() {
        let (_, cache) = recording_cache();
        let profile = Profile {
            name: "ada".to_string(),
            visits: 3,
        };

        cache
            .set("profile/ada", &profile, Duration::from_secs(60), true)
            .await
            .unwrap();

        let loaded: Profile = cache.get("profile/ada", true).await.unwrap();
        assert_eq!(loaded, profile);
    }

    #[tokio::test]
    async fn test_keys_are_namespaced() {
        let (backend, cache) = recording_cache();

        cache.set("foo", "bar", Duration::ZERO, false).await.unwrap();

        assert_eq!(backend.keys(), vec!["poc/foo".to_string()]);
        assert_eq!(cache.namespaced("foo"), "poc/foo");
    }

    #[tokio::test]
    async fn test_zero_expiration_uses_default() {
        let (backend, cache) = recording_cache();

        cache.set("a", &1, Duration::ZERO, false).await.unwrap();
        cache
            .set("b", &1, Duration::from_secs(2 * 60 * 60), false)
            .await
            .unwrap();
        cache
            .set("c", &1, Duration::from_secs(5), false)
            .await
            .unwrap();

        assert_eq!(backend.ttl_of("poc/a"), Some(DEFAULT_EXPIRATION));
        assert_eq!(backend.ttl_of("poc/a"), backend.ttl_of("poc/b"));
        assert_eq!(backend.ttl_of("poc/c"), Some(Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn test_get_into_fills_slot() {
        let (_, cache) = recording_cache();
        cache
            .set("greeting", "hello", Duration::ZERO, false)
            .await
            .unwrap();

        let mut slot = String::new();
        cache.get_into("greeting", &mut slot, false).await.unwrap();
        assert_eq!(slot, "hello");
    }

    #[tokio::test]
    async fn test_get_into_leaves_slot_on_miss() {
        let (_, cache) = recording_cache();

        let mut slot = "untouched".to_string();
        let result = cache.get_into("absent", &mut slot, true).await;

        assert!(matches!(result, Err(CacheError::Miss)));
        assert_eq!(slot, "untouched");
    }

    #[tokio::test]
    async fn test_decode_failure_is_serialization_error() {
        let (_, cache) = recording_cache();
        cache
            .set("n", "not a number", Duration::ZERO, true)
            .await
            .unwrap();

        let result = cache.get::<u64>("n", true).await;
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_clones_share_backend() {
        let cache = Cache::new("").unwrap();
        let clone = cache.clone();

        cache.set("shared", &true, Duration::ZERO, false).await.unwrap();

        let seen: bool = clone.get("shared", false).await.unwrap();
        assert!(seen);
    }

    #[test]
    fn test_effective_expiration() {
        assert_eq!(effective_expiration(Duration::ZERO), DEFAULT_EXPIRATION);
        assert_eq!(
            effective_expiration(Duration::from_millis(1)),
            Duration::from_millis(1)
        );
    }
}

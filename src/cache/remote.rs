//! Redis Store Module
//!
//! [`Backend`] talking to a redis server over a shared multiplexed connection.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, AsyncConnectionConfig, Client, RedisError};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{Backend, REDIS_CONNECT_TIMEOUT, REDIS_RESPONSE_TIMEOUT};
use crate::error::{CacheError, Result};

// == Connection Slot ==
/// The shared connection, tagged with a generation that changes on every
/// reconnect.
#[derive(Debug)]
struct ConnectionSlot<C> {
    generation: u64,
    conn: Option<C>,
}

impl<C: Clone> ConnectionSlot<C> {
    fn new() -> Self {
        Self {
            generation: 0,
            conn: None,
        }
    }

    fn current(&self) -> Option<(u64, C)> {
        self.conn.as_ref().map(|conn| (self.generation, conn.clone()))
    }

    fn install(&mut self, conn: C) -> (u64, C) {
        self.generation += 1;
        self.conn = Some(conn.clone());
        (self.generation, conn)
    }

    /// Drops the connection only if it is still the one from `generation`.
    fn discard(&mut self, generation: u64) -> bool {
        if self.generation != generation || self.conn.is_none() {
            return false;
        }
        self.conn = None;
        true
    }
}

/// Redis-backed store.
///
/// The connection is opened on first use and shared by all callers. A
/// connection that fails with an I/O error is discarded so the next
/// attempt reconnects. Connecting and every command are bounded by
/// timeouts; a timeout surfaces as a retryable [`CacheError::Redis`].
pub struct RedisStore {
    client: Client,
    address: String,
    config: AsyncConnectionConfig,
    slot: Mutex<ConnectionSlot<MultiplexedConnection>>,
}

impl RedisStore {
    /// Creates a store for `host:port`. No connection is made yet.
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let address = format!("{}:{}", host.trim(), port);
        let client = Client::open(format!("redis://{}/", address))
            .map_err(|e| CacheError::Config(format!("invalid redis address '{}': {}", address, e)))?;

        Ok(Self {
            client,
            address,
            config: AsyncConnectionConfig::new()
                .set_connection_timeout(REDIS_CONNECT_TIMEOUT)
                .set_response_timeout(REDIS_RESPONSE_TIMEOUT),
            slot: Mutex::new(ConnectionSlot::new()),
        })
    }

    /// Replaces the connect and per-command timeouts.
    pub fn with_timeouts(mut self, connect: Duration, response: Duration) -> Self {
        self.config = AsyncConnectionConfig::new()
            .set_connection_timeout(connect)
            .set_response_timeout(response);
        self
    }

    /// The `host:port` this store connects to.
    pub fn address(&self) -> &str {
        &self.address
    }

    async fn connection(&self) -> Result<(u64, MultiplexedConnection)> {
        if let Some(current) = self.slot.lock().await.current() {
            return Ok(current);
        }

        // Connect outside the slot lock
        debug!(address = %self.address, "connecting to redis");
        let conn = self
            .client
            .get_multiplexed_async_connection_with_config(&self.config)
            .await?;

        let mut slot = self.slot.lock().await;
        if let Some(current) = slot.current() {
            // Another caller connected first; keep theirs
            return Ok(current);
        }
        Ok(slot.install(conn))
    }

    async fn discard_broken(&self, generation: u64, err: &RedisError) {
        if !(err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal()) {
            return;
        }
        if self.slot.lock().await.discard(generation) {
            warn!(address = %self.address, error = %err, "dropping redis connection");
        }
    }
}

/// PSETEX argument for `ttl`: whole milliseconds, at least one.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl Backend for RedisStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let (generation, mut conn) = self.connection().await?;

        match conn.get::<_, Option<Vec<u8>>>(key).await {
            Ok(value) => {
                debug!(key, hit = value.is_some(), "redis GET");
                Ok(value)
            }
            Err(err) => {
                self.discard_broken(generation, &err).await;
                Err(err.into())
            }
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let (generation, mut conn) = self.connection().await?;
        let millis = ttl_millis(ttl);

        match conn.pset_ex::<_, _, ()>(key, value, millis).await {
            Ok(()) => {
                debug!(key, ttl_ms = millis, "redis PSETEX");
                Ok(())
            }
            Err(err) => {
                self.discard_broken(generation, &err).await;
                Err(err.into())
            }
        }
    }
}

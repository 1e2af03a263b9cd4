//! API Handlers
//!
//! HTTP request handlers. The read/health routes are constant stubs; the
//! `/cache/:key` routes call straight through to the cache abstraction.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use tracing::debug;

use crate::cache::{effective_expiration, Cache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::requests::validate_key;
use crate::models::{GetValueResponse, PutValueRequest, PutValueResponse, ReadQuery};

/// Application state shared across all handlers.
///
/// The cache handle is cheap to clone and safe to share; no extra locking.
#[derive(Clone)]
pub struct AppState {
    pub cache: Cache,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Builds the cache selected by the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Cache::from_config(&config.cache_config())?))
    }
}

/// Handler for GET /healthz
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Handler for GET /read/cache
pub async fn read_cache_handler() -> &'static str {
    "OK"
}

/// Handler for GET /read/db
pub async fn read_db_handler() -> &'static str {
    "OK"
}

/// Handler for GET /cache/:key
///
/// Returns the stored JSON value, or 404 on a miss.
pub async fn get_value_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<ReadQuery>,
) -> Result<Json<GetValueResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let value: serde_json::Value = state.cache.get(&key, query.retry).await?;
    debug!(key = %key, "served value from cache");

    Ok(Json(GetValueResponse::new(key, value)))
}

/// Handler for PUT /cache/:key
///
/// Stores any JSON value with an optional TTL in seconds.
pub async fn put_value_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<PutValueRequest>,
) -> Result<Json<PutValueResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let expiration = effective_expiration(req.expiration());
    let expires_at = chrono::Duration::from_std(expiration)
        .ok()
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| {
            CacheError::InvalidRequest(format!("TTL out of range: {}s", expiration.as_secs()))
        })?;

    state
        .cache
        .set(&key, &req.value, expiration, req.retry)
        .await?;

    Ok(Json(PutValueResponse::new(key, expires_at)))
}

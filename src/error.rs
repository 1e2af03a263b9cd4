//! Error types for the cache abstraction
//!
//! Provides unified error handling using thiserror. Backend-specific
//! "not found" signals never leave the backends: they surface as
//! [`CacheError::Miss`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache abstraction and the HTTP layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key has no current value
    #[error("cache: key is missing")]
    Miss,

    /// Redis connectivity or protocol failure, passed through unmodified
    #[error(transparent)]
    Redis(#[from] redis::RedisError),

    /// Failure reported by a non-redis backend
    #[error("Backend error: {0}")]
    Backend(String),

    /// Value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid construction input
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CacheError {
    /// True for the errors the retry loop may try again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CacheError::Redis(_) | CacheError::Backend(_))
    }
}

impl From<rmp_serde::encode::Error> for CacheError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

impl From<rmp_serde::decode::Error> for CacheError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Miss => StatusCode::NOT_FOUND,
            CacheError::Redis(_) | CacheError::Backend(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Serialization(_) | CacheError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache abstraction.
pub type Result<T> = std::result::Result<T, CacheError>;

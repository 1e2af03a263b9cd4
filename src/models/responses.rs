//! Response DTOs for the HTTP API
//!
//! Defines the structure of outgoing response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Response body for `GET /cache/:key`
#[derive(Debug, Clone, Serialize)]
pub struct GetValueResponse {
    pub key: String,
    pub value: serde_json::Value,
}

impl GetValueResponse {
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for `PUT /cache/:key`
#[derive(Debug, Clone, Serialize)]
pub struct PutValueResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// When the value stops being readable
    pub expires_at: DateTime<Utc>,
}

impl PutValueResponse {
    pub fn new(key: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
            expires_at,
        }
    }
}

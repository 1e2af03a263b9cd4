//! poc_cache - HTTP service skeleton with a retrying cache abstraction
//!
//! Provides typed get/set over Redis or an in-process fallback store, with
//! key namespacing, MessagePack serialization and optional retries.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::Cache;
pub use config::{CacheConfig, Config};
pub use error::{CacheError, Result};

//! API Module
//!
//! HTTP handlers and routing for the service.
//!
//! # Endpoints
//! - `GET /healthz` - Health check stub
//! - `GET /read/cache` - Read stub
//! - `GET /read/db` - Read stub
//! - `GET /cache/:key` - Read a value through the cache
//! - `PUT /cache/:key` - Store a value through the cache

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Sweep: Removes expired entries from the local cache store

mod sweep;

pub use sweep::spawn_sweep_task;

//! TTL Sweep Task
//!
//! Background task that periodically removes expired local-store entries.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LocalState;

/// Spawns a task that removes expired entries every `interval`.
///
/// The task only holds a weak reference, so it ends on its own once the
/// store is dropped. The returned handle can abort it sooner.
///
/// # Example
/// ```ignore
/// let state = Arc::new(RwLock::new(LocalState::new(5000)));
/// let handle = spawn_sweep_task(Arc::downgrade(&state), Duration::from_secs(300));
/// // Later:
/// handle.abort();
/// ```
pub fn spawn_sweep_task(state: Weak<RwLock<LocalState>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(?interval, "starting local cache sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let Some(state) = state.upgrade() else {
                debug!("local cache dropped, stopping sweep task");
                break;
            };

            let (removed, remaining) = {
                let mut guard = state.write().await;
                let removed = guard.cleanup_expired();
                (removed, guard.len())
            };

            if removed > 0 {
                info!(removed, remaining, "TTL sweep removed expired entries");
            } else {
                debug!(remaining, "TTL sweep found no expired entries");
            }
        }
    })
}

//! Expiry Sweep Task
//!
//! Background task that periodically evicts entries whose timeout has
//! elapsed, starting from the ring's oldest cursor.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::ring::TimeoutRing;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. Each sweep takes the ring's write lock once and evicts
/// from the oldest cursor up to the first live entry.
///
/// # Arguments
/// * `ring` - Shared reference to the ring
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let ring = Arc::new(TimeoutRing::new(1024));
/// let sweep_handle = spawn_sweep_task(ring.clone(), 1);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(ring: Arc<TimeoutRing>, sweep_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = ring.evict_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} elapsed entries", removed);
            } else {
                debug!("Expiry sweep: no elapsed entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::RingEntry;
    use std::time::Duration;

    #[tokio::test]
    async fn test_sweep_task_removes_elapsed_entries() {
        let ring = Arc::new(TimeoutRing::new(16));
        ring.insert(RingEntry::with_ttl("expire_soon", 1));

        // Sweep every second
        let handle = spawn_sweep_task(ring.clone(), 1);

        // Wait for the entry to elapse and a sweep to run
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert!(
            ring.get("expire_soon").is_none(),
            "Elapsed entry should have been swept"
        );
        assert!(ring.is_empty());

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_live_entries() {
        let ring = Arc::new(TimeoutRing::new(16));
        ring.insert(RingEntry::with_ttl("long_lived", 3600));

        let handle = spawn_sweep_task(ring.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        let entry = ring.get("long_lived");
        assert!(entry.is_some(), "Live entry should not be swept");
        assert_eq!(entry.unwrap().key, "long_lived");

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let ring = Arc::new(TimeoutRing::new(16));

        let handle = spawn_sweep_task(ring, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}

//! Periodic purge of expired listings.
//!
//! Housekeeping only: the matcher filters expired listings out regardless of
//! when this task last ran.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::store::ListingStore;

/// Spawn the cleanup loop. Runs `delete_expired` every `interval` until the
/// token is cancelled.
pub fn spawn_cleanup(
    store: Arc<dyn ListingStore>,
    expiry_days: u32,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so startup stays cheap.
        tick.tick().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tick.tick() => {
                    match store.delete_expired(expiry_days).await {
                        Ok(0) => {}
                        Ok(n) => tracing::info!(removed = n, "purged expired listings"),
                        Err(e) => tracing::warn!(error = %e, "expired-listing cleanup failed"),
                    }
                }
            }
        }
    })
}

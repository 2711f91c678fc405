//! Cart polling loop
//!
//! Refreshes the cart read-model on a fixed interval and on demand (the
//! window-focus analog), retrying a few times per cycle before leaving the
//! connection error standing in the store. Invalidation after a mutation
//! guarantees the next read reflects server state; it does not discard
//! in-flight reads, so a stale read can transiently win until the next
//! cycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::interval;

use crate::PosTerminal;

/// Cart read-model refresh interval
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Attempts per refresh cycle before giving up until the next tick
pub const MAX_RETRY_ATTEMPTS: u32 = 3;

const RETRY_DELAY_MS: u64 = 500;

/// Periodic cart refresher
pub struct CartWatcher {
    terminal: Arc<PosTerminal>,
    wake: Arc<Notify>,
}

impl CartWatcher {
    pub fn new(terminal: Arc<PosTerminal>) -> Self {
        Self {
            terminal,
            wake: Arc::new(Notify::new()),
        }
    }

    /// Handle used to trigger an immediate refresh, e.g. when the terminal
    /// window regains focus or the user hits the reload action
    pub fn waker(&self) -> Arc<Notify> {
        self.wake.clone()
    }

    /// Run the polling loop until the owning task is dropped. The first
    /// refresh happens immediately.
    pub async fn run(self) {
        let mut ticker = interval(POLL_INTERVAL);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.wake.notified() => {}
            }
            self.refresh_with_retry().await;
        }
    }

    async fn refresh_with_retry(&self) {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.terminal.refresh_cart().await {
                Ok(()) => return,
                Err(err) if attempt < MAX_RETRY_ATTEMPTS => {
                    tracing::warn!(
                        attempt,
                        max = MAX_RETRY_ATTEMPTS,
                        error = %err,
                        "cart refresh failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
                }
                Err(err) => {
                    // refresh_cart already parked the error in the store
                    tracing::warn!(error = %err, "cart refresh failed after retries");
                    return;
                }
            }
        }
    }
}

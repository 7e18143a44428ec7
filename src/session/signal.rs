//! One-shot, set-once stop signal.
//!
//! The only state shared between the session's event loop and external
//! shutdown triggers (spoken termination phrase, Ctrl-C, process close).
//! Setting it is idempotent: exactly one trigger wins, every waiter wakes.

use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable set-once flag with async waiting.
#[derive(Debug, Clone)]
pub struct StopSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Sets the signal. Returns `true` only for the call that set it first;
    /// all later calls are no-ops.
    pub fn trigger(&self) -> bool {
        !self.tx.send_replace(true)
    }

    /// Returns whether the signal has been set.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Waits until the signal is set. Resolves immediately if already set.
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

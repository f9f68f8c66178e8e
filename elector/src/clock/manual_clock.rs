use std::sync::Arc;

use tokio::sync::watch;

use crate::clock::Clock;

/// A clock whose time only moves when told to.
///
/// Clones share the same time. Tasks sleeping on it wake up when
/// [`advance`](Self::advance) or [`set`](Self::set) reaches their deadline.
#[derive(Debug, Clone)]
pub struct ManualClock {
    tx: Arc<watch::Sender<u64>>,
}

impl ManualClock {
    pub fn new(initial_secs: u64) -> Self {
        let (tx, _rx) = watch::channel(initial_secs);
        Self { tx: Arc::new(tx) }
    }

    /// Move time forward by `secs` seconds.
    pub fn advance(&self, secs: u64) {
        self.tx.send_modify(|t| *t += secs);
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: u64) {
        self.tx.send_replace(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        *self.tx.borrow()
    }

    async fn sleep_until(&self, deadline: u64) {
        let mut rx = self.tx.subscribe();

        loop {
            if *rx.borrow_and_update() >= deadline {
                return;
            }

            // The sender lives as long as self.
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

//! The background task that waits for an election's deadline.
//!
//! A resolver is bound to one generation. It sleeps until the deadline, then
//! notifies the Core, which tallies and announces only if that generation is
//! still running. Stopping an election does not touch its resolver; the
//! resolver finds out on wake-up that it is stale. A shutdown signal makes
//! the resolver quit at once without notifying.

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use tracing::info;
use tracing::Instrument;

use crate::clock::Clock;
use crate::core::io::notification::Notification;

pub(crate) struct Resolver<Clk>
where Clk: Clock
{
    generation: u64,
    deadline: u64,
    clock: Clk,
    tx_notification: mpsc::WeakUnboundedSender<Notification>,
    rx_shutdown: watch::Receiver<bool>,
}

/// Handle to a spawned [`Resolver`].
pub(crate) struct ResolverHandle {
    pub(crate) generation: u64,
    join_handle: JoinHandle<()>,
}

impl ResolverHandle {
    /// Cancel the resolver without waiting for it.
    pub(crate) fn abort(self) {
        self.join_handle.abort();
    }

    /// Wait for the resolver task to quit.
    pub(crate) async fn join(self) {
        let res = self.join_handle.await;
        debug!(
            generation = self.generation,
            "resolver joined: {:?}",
            res.err()
        );
    }
}

impl<Clk> Resolver<Clk>
where Clk: Clock
{
    pub(crate) fn spawn(
        generation: u64,
        deadline: u64,
        clock: Clk,
        tx_notification: mpsc::WeakUnboundedSender<Notification>,
        rx_shutdown: watch::Receiver<bool>,
    ) -> ResolverHandle {
        let resolver = Self {
            generation,
            deadline,
            clock,
            tx_notification,
            rx_shutdown,
        };

        let span = tracing::debug_span!("Resolver", generation, deadline);
        let join_handle = tokio::spawn(resolver.run().instrument(span));

        ResolverHandle {
            generation,
            join_handle,
        }
    }

    async fn run(mut self) {
        debug!("resolver started");

        if !self.wait_for_deadline().await {
            info!("shutting down before deadline, resolver quits");
            return;
        }

        let Some(tx) = self.tx_notification.upgrade() else {
            tracing::warn!(
                "failed to upgrade tx, Core may have closed the receiver"
            );
            return;
        };

        let notify = Notification::DeadlineReached {
            generation: self.generation,
            deadline: self.deadline,
        };

        debug!("deadline reached: {}", notify);

        if let Err(e) = tx.send(notify) {
            tracing::warn!("failed to send deadline notification: {}", e.0);
        }
    }

    /// Returns `true` once the deadline is reached, or `false` if shutdown
    /// is signaled first.
    async fn wait_for_deadline(&mut self) -> bool {
        loop {
            if *self.rx_shutdown.borrow() {
                return false;
            }

            let now = self.clock.now();
            if now >= self.deadline {
                return true;
            }

            debug!(now, deadline = self.deadline, "wait for deadline");

            futures::select_biased! {
                changed = self.rx_shutdown.changed().fuse() => {
                    if changed.is_err() {
                        // The shutdown sender is gone: the Elector is dropped.
                        return false;
                    }
                }
                _ = self.clock.sleep_until(self.deadline).fuse() => {}
            }
        }
    }
}

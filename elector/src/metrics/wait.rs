use core::time::Duration;

use futures::FutureExt;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::metrics::Status;

// Error variants related to status waiting.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    #[error("timeout after {0:?} when {1}")]
    Timeout(Duration, String),

    #[error("elector is shutting down")]
    ShuttingDown,
}

/// Wait is a wrapper of the status channel that impls several utils to wait
/// for the status to satisfy some condition.
///
/// The timeout is measured in real time on the tokio timer, not on the
/// elector's [`Clock`](crate::Clock).
pub struct Wait {
    pub timeout: Duration,
    pub rx: watch::Receiver<Status>,
}

impl Wait {
    /// Wait for status to satisfy some condition or timeout.
    #[tracing::instrument(level = "trace", skip(self, func), fields(msg=%msg.to_string()))]
    pub async fn status<T>(
        &self,
        func: T,
        msg: impl ToString,
    ) -> Result<Status, WaitError>
    where
        T: Fn(&Status) -> bool + Send,
    {
        let timeout_at = Instant::now() + self.timeout;

        let mut rx = self.rx.clone();
        loop {
            let latest = rx.borrow().clone();

            tracing::debug!("wait {:} latest: {}", msg.to_string(), latest);

            if func(&latest) {
                tracing::debug!(
                    "done wait {:} latest: {}",
                    msg.to_string(),
                    latest
                );
                return Ok(latest);
            }

            let now = Instant::now();
            if now >= timeout_at {
                return Err(WaitError::Timeout(
                    self.timeout,
                    format!("{} latest: {}", msg.to_string(), latest),
                ));
            }

            let delay = tokio::time::sleep_until(timeout_at);

            futures::select_biased! {
                _ = delay.fuse() => {
                    tracing::debug!( "timeout wait {:} latest: {}", msg.to_string(), latest );
                    return Err(WaitError::Timeout(self.timeout, format!("{} latest: {}", msg.to_string(), latest)));
                }
                changed = rx.changed().fuse() => {
                    match changed {
                        Ok(_) => {
                            // status changed, continue the waiting loop
                        },
                        Err(err) => {
                            tracing::debug!(
                                "error: {:?}; wait {:} latest: {:?}",
                                err,
                                msg.to_string(),
                                latest
                            );

                            return Err(WaitError::ShuttingDown);
                        }
                    }
                }
            };
        }
    }

    /// Wait until no election is running.
    #[tracing::instrument(level = "trace", skip(self), fields(msg=msg.to_string().as_str()))]
    pub async fn idle(&self, msg: impl ToString) -> Result<Status, WaitError> {
        self.status(
            |s| s.is_idle(),
            &format!("{} .election == None", msg.to_string()),
        )
        .await
    }

    /// Wait until the election of `generation` is running.
    #[tracing::instrument(level = "trace", skip(self), fields(msg=msg.to_string().as_str()))]
    pub async fn active(
        &self,
        generation: u64,
        msg: impl ToString,
    ) -> Result<Status, WaitError> {
        self.status(
            |s| s.active_generation() == Some(generation),
            &format!("{} .election.generation == {}", msg.to_string(), generation),
        )
        .await
    }

    /// Wait until at least `want` elections have ended.
    #[tracing::instrument(level = "trace", skip(self), fields(msg=msg.to_string().as_str()))]
    pub async fn resolved(
        &self,
        want: u64,
        msg: impl ToString,
    ) -> Result<Status, WaitError> {
        self.status(
            |s| s.resolved >= want,
            &format!("{} .resolved >= {}", msg.to_string(), want),
        )
        .await
    }

    /// Wait until at least `want` stale resolver wake-ups have been ignored.
    #[tracing::instrument(level = "trace", skip(self), fields(msg=msg.to_string().as_str()))]
    pub async fn stale_wakeups(
        &self,
        want: u64,
        msg: impl ToString,
    ) -> Result<Status, WaitError> {
        self.status(
            |s| s.stale_wakeups >= want,
            &format!("{} .stale_wakeups >= {}", msg.to_string(), want),
        )
        .await
    }
}

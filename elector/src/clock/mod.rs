//! Time source of the election engine.
//!
//! Deadlines are unix epoch seconds so that they can be persisted and
//! compared after a restart.

mod manual_clock;
mod system_clock;


pub use manual_clock::ManualClock;
use openraft_macros::add_async_trait;
pub use system_clock::SystemClock;

/// A clock supplies the current time and a way to wait for a point in time.
#[add_async_trait]
pub trait Clock: Clone + Send + Sync + 'static {
    /// Seconds since the unix epoch.
    fn now(&self) -> u64;

    /// Return at or after `deadline`.
    ///
    /// It may return early; the caller re-checks [`Clock::now`].
    async fn sleep_until(&self, deadline: u64);
}

//! Defines [`SnapshotStore`] trait.

use std::io;

use openraft_macros::add_async_trait;

/// API for the blob store that keeps the election snapshot.
///
/// Values are opaque bytes addressed by a key. The engine reads once when it
/// starts and writes after every mutation; writes to the same key replace
/// the previous value.
///
/// ### To ensure correctness:
///
/// - A `write` that returns `Ok` must be visible to a following `read`, also
///   after the process restarts.
/// - A `write` should replace the value atomically, a crash must leave either
///   the old or the new value.
#[add_async_trait]
pub trait SnapshotStore: Send + Sync + 'static {
    /// Read the value stored under `key`, `None` if there is none.
    async fn read(&mut self, key: &str) -> Result<Option<Vec<u8>>, io::Error>;

    /// Replace the value stored under `key`.
    async fn write(&mut self, key: &str, buf: &[u8]) -> Result<(), io::Error>;
}

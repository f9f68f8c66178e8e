use std::io;

use openraft_macros::add_async_trait;

use crate::storage::Snapshot;
use crate::storage::SnapshotStore;

/// Typed snapshot access on top of a [`SnapshotStore`].
///
/// Undecodable data is reported as [`io::ErrorKind::InvalidData`].
#[add_async_trait]
pub trait SnapshotStoreExt: SnapshotStore {
    async fn read_snapshot(
        &mut self,
        key: &str,
    ) -> Result<Option<Snapshot>, io::Error> {
        let data = self.read(key).await?;

        if let Some(data) = data {
            let snapshot = serde_json::from_slice(&data)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            Ok(Some(snapshot))
        } else {
            Ok(None)
        }
    }

    async fn write_snapshot(
        &mut self,
        key: &str,
        snapshot: &Snapshot,
    ) -> Result<(), io::Error> {
        let buf = serde_json::to_vec(snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        self.write(key, &buf).await
    }
}

impl<T> SnapshotStoreExt for T where T: SnapshotStore {}

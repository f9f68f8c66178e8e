//! The snapshot storage interface and the snapshot format.

mod snapshot;
mod snapshot_store;
mod snapshot_store_ext;


pub use snapshot::Snapshot;
pub use snapshot_store::SnapshotStore;
pub use snapshot_store_ext::SnapshotStoreExt;

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use elector::storage::SnapshotStore;
use tracing::debug;


/// An in-memory blob store implementing the [`SnapshotStore`] trait.
///
/// Clones share the same data, so a test can keep one and hand another to an
/// `Elector`. Reads and writes can be made to fail to simulate an
/// unavailable store.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    store: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following read fail, or succeed again.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    /// Make every following write fail, or succeed again.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Get the raw value under `key`, bypassing the failure switches.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let store = self.store.lock().unwrap();
        store.get(key).cloned()
    }

    /// Get the value under `key` as a string.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| String::from_utf8_lossy(&v).into_owned())
    }

    /// Set the raw value under `key`, bypassing the failure switches.
    pub fn put(&self, key: &str, value: impl Into<Vec<u8>>) {
        let mut store = self.store.lock().unwrap();
        store.insert(key.to_string(), value.into());
    }
}

impl SnapshotStore for MemStore {
    async fn read(&mut self, key: &str) -> Result<Option<Vec<u8>>, io::Error> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "MemStore: reads are failing",
            ));
        }

        let got = self.get(key);

        debug!("MemStore::read: key={}, got={:?}", key, got.as_ref().map(|v| v.len()));
        Ok(got)
    }

    async fn write(&mut self, key: &str, buf: &[u8]) -> Result<(), io::Error> {
        debug!("MemStore::write: key={}, len={}", key, buf.len());

        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "MemStore: writes are failing",
            ));
        }

        self.put(key, buf);
        Ok(())
    }
}

use std::io;
use std::path::Path;
use std::path::PathBuf;

use elector::storage::SnapshotStore;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;


/// A [`SnapshotStore`] keeping every key as a file under a base directory.
///
/// Key `a/b` is stored in `<dir>/a/b.json`. A write goes to a temp file
/// first, is synced to disk and then renamed into place, so a crash leaves
/// either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Map a key to its file path.
    ///
    /// Segments must be non-empty and must not be `.` or `..`.
    pub fn key_path(&self, key: &str) -> Result<PathBuf, io::Error> {
        let mut path = self.dir.clone();
        let mut segments = key.split('/').peekable();

        while let Some(seg) = segments.next() {
            if seg.is_empty() || seg == "." || seg == ".." || seg.contains('\\')
            {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid key: {:?}", key),
                ));
            }
            if segments.peek().is_some() {
                path.push(seg);
            } else {
                path.push(format!("{}.json", seg));
            }
        }

        Ok(path)
    }
}

impl SnapshotStore for FileStore {
    async fn read(&mut self, key: &str) -> Result<Option<Vec<u8>>, io::Error> {
        let path = self.key_path(key)?;

        let got = match fs::read(&path).await {
            Ok(data) => Some(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        debug!(
            "FileStore::read: path={}, len={:?}",
            path.display(),
            got.as_ref().map(|v| v.len())
        );
        Ok(got)
    }

    async fn write(&mut self, key: &str, buf: &[u8]) -> Result<(), io::Error> {
        let path = self.key_path(key)?;

        debug!("FileStore::write: path={}, len={}", path.display(), buf.len());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // The data must be on disk before the rename makes it visible.
        let temp_path = path.with_extension("json.tmp");
        {
            let mut f = fs::File::create(&temp_path).await?;
            f.write_all(buf).await?;
            f.sync_all().await?;
        }
        fs::rename(&temp_path, &path).await?;

        Ok(())
    }
}

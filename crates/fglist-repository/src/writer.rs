//! Serialized read-modify-write of list files
//!
//! [`AtomicWriter::mutate`] is the only code path that changes a list file.
//! It takes the per-file lock from [`LockRegistry`], snapshots the current
//! content to a timestamped backup and replaces the file through a
//! temporary sibling plus rename, so readers see either the old or the new
//! content and never a partial write.

use chrono::{DateTime, Local};
use dashmap::DashMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::RepositoryResult;

/// Timestamp format used in backup file suffixes
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// One async mutex per list file path
///
/// Entries are created on first use and dropped again once the last
/// [`FileLock`] for the path is released with nobody waiting on it.
/// Locks are never nested, so there is no ordering to respect between them.
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: DashMap<PathBuf, Arc<Mutex<()>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `path`, waiting for the current holder if any
    pub async fn lock(&self, path: &Path) -> FileLock<'_> {
        // Clone the Arc out so the DashMap shard is not held across the await
        let lock = self
            .locks
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        FileLock {
            registry: self,
            path: path.to_path_buf(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Number of paths currently locked or waited on
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn release(&self, path: &Path) {
        // Only the map itself holds the mutex: no holder and no waiter left
        self.locks.remove_if(path, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Held lock on one list file, returned by [`LockRegistry::lock`]
#[derive(Debug)]
pub struct FileLock<'a> {
    registry: &'a LockRegistry,
    path: PathBuf,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for FileLock<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.registry.release(&self.path);
    }
}

/// Result of a successful mutation
#[derive(Debug)]
pub struct Mutation<T> {
    /// Value produced by the transform
    pub output: T,
    /// Backup written before the file was replaced, if the file had content
    pub backup: Option<PathBuf>,
}

/// Applies transforms to list files under their per-file lock
#[derive(Debug, Clone)]
pub struct AtomicWriter {
    locks: Arc<LockRegistry>,
}

impl AtomicWriter {
    pub fn new(locks: Arc<LockRegistry>) -> Self {
        Self { locks }
    }

    pub fn locks(&self) -> &Arc<LockRegistry> {
        &self.locks
    }

    /// Read, transform, back up and rewrite `path` as one serialized step
    ///
    /// `transform` receives the current content (`None` when the file does
    /// not exist) and returns the new content with a caller defined output.
    /// When it fails nothing is written: no backup, no change to the file.
    pub async fn mutate<T, F>(&self, path: &Path, transform: F) -> RepositoryResult<Mutation<T>>
    where
        F: FnOnce(Option<&str>) -> RepositoryResult<(String, T)>,
    {
        let _guard = self.locks.lock(path).await;

        let current = read_optional(path).await?;
        let (new_content, output) = transform(current.as_deref())?;

        let backup = match current.as_deref() {
            Some(content) if !content.is_empty() => {
                Some(create_backup(path, content, Local::now()).await?)
            }
            _ => None,
        };

        write_atomic(path, new_content.as_bytes()).await?;
        debug!(
            "Rewrote {} ({} bytes, backup: {:?})",
            path.display(),
            new_content.len(),
            backup
        );

        Ok(Mutation { output, backup })
    }
}

/// Read a file as UTF-8, returning `None` if it does not exist
pub async fn read_optional(path: &Path) -> RepositoryResult<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

/// `<file>.bak.<YYYYmmddHHMMSS>` next to the list file
pub fn backup_path(path: &Path, at: DateTime<Local>) -> PathBuf {
    with_suffix(
        path,
        &format!(".bak.{}", at.format(BACKUP_TIMESTAMP_FORMAT)),
    )
}

/// Temporary sibling used while replacing `path`
pub fn temp_path(path: &Path) -> PathBuf {
    with_suffix(path, ".tmp")
}

/// Copy `content` verbatim into a timestamped backup of `path`
///
/// Two backups within the same second share a name; the later one wins.
pub async fn create_backup(
    path: &Path,
    content: &str,
    at: DateTime<Local>,
) -> RepositoryResult<PathBuf> {
    let backup = backup_path(path, at);
    fs::write(&backup, content).await?;
    Ok(backup)
}

/// Replace `path` with `bytes` via a synced temp file and rename
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> RepositoryResult<()> {
    let temp = temp_path(path);

    let result = async {
        let mut file = fs::File::create(&temp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp, path).await
    }
    .await;

    if let Err(e) = result {
        let _ = fs::remove_file(&temp).await;
        return Err(e.into());
    }

    Ok(())
}

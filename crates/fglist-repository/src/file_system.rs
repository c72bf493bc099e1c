//! File system based repository implementation

use async_trait::async_trait;
use path_absolutize::Absolutize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::changelog::{ChangeLogEntry, ChangeLogger};
use crate::config::{MissingFilePolicy, RepositoryConfig};
use crate::entries::{normalize_entry, EntryList};
use crate::path::{is_list_filename, resolve_within};
use crate::writer::{read_optional, AtomicWriter, LockRegistry};
use crate::{
    AddOutcome, DeleteOutcome, ListEntry, ListRepository, RepositoryError, RepositoryResult,
    UpdateOutcome,
};

/// File system based repository
///
/// All list files live flat in one base directory, next to their backups
/// and the shared change log. Content is read from disk on every call.
#[derive(Debug)]
pub struct FileSystemListRepository {
    /// Canonical base directory
    base_dir: PathBuf,
    /// Per-file locking, backups and atomic replacement
    writer: AtomicWriter,
    /// Shared audit trail
    changelog: ChangeLogger,
    /// Read behaviour for absent files
    missing_file: MissingFilePolicy,
}

impl FileSystemListRepository {
    /// Create a repository, creating the base directory if needed
    pub async fn new(config: RepositoryConfig) -> RepositoryResult<Self> {
        Self::with_locks(config, Arc::new(LockRegistry::new())).await
    }

    /// Create a repository that shares an existing lock registry
    pub async fn with_locks(
        config: RepositoryConfig,
        locks: Arc<LockRegistry>,
    ) -> RepositoryResult<Self> {
        let change_log = config.change_log_path();

        fs::create_dir_all(&config.base_dir).await.map_err(|e| {
            warn!(
                "Failed to create base directory {}: {}",
                config.base_dir.display(),
                e
            );
            RepositoryError::InvalidPath {
                path: config.base_dir.clone(),
            }
        })?;

        let base_dir = config
            .base_dir
            .absolutize()
            .map_err(|e| RepositoryError::Other(format!("Failed to absolutize path: {}", e)))?
            .to_path_buf();
        // Symlink targets are compared against the fully resolved directory
        let base_dir = fs::canonicalize(&base_dir)
            .await
            .map_err(|_| RepositoryError::InvalidPath { path: base_dir })?;

        debug!(
            "Opened list repository at {} (change log: {})",
            base_dir.display(),
            change_log.display()
        );

        Ok(Self {
            base_dir,
            writer: AtomicWriter::new(locks),
            changelog: ChangeLogger::new(change_log),
            missing_file: config.missing_file,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn change_log_path(&self) -> &Path {
        self.changelog.path()
    }

    pub fn locks(&self) -> &Arc<LockRegistry> {
        self.writer.locks()
    }

    async fn resolve(&self, filename: &str) -> RepositoryResult<PathBuf> {
        resolve_within(&self.base_dir, filename).await
    }

    /// Append to the change log; failures never fail the mutation
    async fn record(&self, entry: ChangeLogEntry) {
        if let Err(e) = self.changelog.record(&entry).await {
            warn!(
                "Failed to append to change log {}: {} (entry: {})",
                self.changelog.path().display(),
                e,
                entry.to_line().trim_end()
            );
        }
    }
}

fn not_found(filename: &str) -> RepositoryError {
    RepositoryError::NotFound {
        name: filename.to_string(),
    }
}

#[async_trait]
impl ListRepository for FileSystemListRepository {
    async fn list_files(&self) -> RepositoryResult<Vec<String>> {
        let mut dir = match fs::read_dir(&self.base_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !is_list_filename(&name) {
                continue;
            }
            let Ok(path) = resolve_within(&self.base_dir, &name).await else {
                debug!("Skipping {} (points outside {})", name, self.base_dir.display());
                continue;
            };
            if fs::metadata(&path).await?.is_file() {
                files.push(name);
            }
        }

        files.sort();
        Ok(files)
    }

    async fn load_entries(&self, filename: &str) -> RepositoryResult<Vec<ListEntry>> {
        let path = self.resolve(filename).await?;

        let entries = match read_optional(&path).await? {
            Some(content) => EntryList::parse(&content),
            None => match self.missing_file {
                MissingFilePolicy::NotFound => return Err(not_found(filename)),
                MissingFilePolicy::Empty => EntryList::default(),
            },
        };

        Ok(ListEntry::enumerate(entries.into_vec()))
    }

    async fn add_entry(&self, filename: &str, value: &str) -> RepositoryResult<AddOutcome> {
        let path = self.resolve(filename).await?;
        let value = normalize_entry(value)?;

        let mutation = self
            .writer
            .mutate(&path, |current| {
                let mut entries = EntryList::parse(current.unwrap_or_default());
                let index = entries.add(&value)?;
                Ok((entries.render(), index))
            })
            .await?;

        info!("[{}] ADD index={} value={}", filename, mutation.output, value);
        self.record(ChangeLogEntry::added(filename, &value)).await;

        Ok(AddOutcome {
            index: mutation.output,
            value,
        })
    }

    async fn update_entry(
        &self,
        filename: &str,
        index: usize,
        value: &str,
    ) -> RepositoryResult<UpdateOutcome> {
        let path = self.resolve(filename).await?;
        let value = normalize_entry(value)?;

        let mutation = self
            .writer
            .mutate(&path, |current| {
                let mut entries = EntryList::parse(current.ok_or_else(|| not_found(filename))?);
                let old_value = entries.update_at(index, &value)?;
                Ok((entries.render(), old_value))
            })
            .await?;
        let old_value = mutation.output;

        info!(
            "[{}] UPDATE index={} {} -> {}",
            filename, index, old_value, value
        );
        self.record(ChangeLogEntry::updated(filename, &old_value, &value))
            .await;

        Ok(UpdateOutcome {
            index,
            old_value,
            new_value: value,
        })
    }

    async fn delete_entry(&self, filename: &str, index: usize) -> RepositoryResult<DeleteOutcome> {
        let path = self.resolve(filename).await?;

        let mutation = self
            .writer
            .mutate(&path, |current| {
                let mut entries = EntryList::parse(current.ok_or_else(|| not_found(filename))?);
                let deleted = entries.delete_at(index)?;
                Ok((entries.render(), deleted))
            })
            .await?;
        let deleted_value = mutation.output;

        info!("[{}] DELETE index={} value={}", filename, index, deleted_value);
        self.record(ChangeLogEntry::deleted(filename, &deleted_value))
            .await;

        Ok(DeleteOutcome {
            index,
            deleted_value,
        })
    }

    async fn export(&self, filename: &str) -> RepositoryResult<Vec<u8>> {
        let path = self.resolve(filename).await?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(not_found(filename)),
            Err(e) => Err(e.into()),
        }
    }
}

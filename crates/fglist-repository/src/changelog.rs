//! Append-only audit trail shared by all list files
//!
//! Each mutation appends one line:
//!
//! ```text
//! [2024-03-09 07:05:01] [domains.txt] [UPDATE] [old.example -> new.example]
//! ```

use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::RepositoryResult;

/// Timestamp format used inside change log lines
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of mutation recorded in the change log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOperation {
    Add,
    Update,
    Delete,
}

impl ChangeOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeOperation::Add => "ADD",
            ChangeOperation::Update => "UPDATE",
            ChangeOperation::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ChangeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single change log record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogEntry {
    pub timestamp: DateTime<Local>,
    pub filename: String,
    pub operation: ChangeOperation,
    pub detail: String,
}

impl ChangeLogEntry {
    pub fn new(
        filename: impl Into<String>,
        operation: ChangeOperation,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            filename: filename.into(),
            operation,
            detail: detail.into(),
        }
    }

    pub fn added(filename: &str, value: &str) -> Self {
        Self::new(filename, ChangeOperation::Add, value)
    }

    pub fn updated(filename: &str, old_value: &str, new_value: &str) -> Self {
        Self::new(
            filename,
            ChangeOperation::Update,
            format!("{} -> {}", old_value, new_value),
        )
    }

    pub fn deleted(filename: &str, value: &str) -> Self {
        Self::new(filename, ChangeOperation::Delete, value)
    }

    /// Format as a log line, including the trailing newline
    pub fn to_line(&self) -> String {
        format!(
            "[{}] [{}] [{}] [{}]\n",
            self.timestamp.format(LOG_TIMESTAMP_FORMAT),
            self.filename,
            self.operation,
            self.detail
        )
    }
}

/// Appends [`ChangeLogEntry`] lines to one shared file
#[derive(Debug)]
pub struct ChangeLogger {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl ChangeLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the log file if needed
    pub async fn record(&self, entry: &ChangeLogEntry) -> RepositoryResult<()> {
        let line = entry.to_line();
        let _guard = self.append_lock.lock().await;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

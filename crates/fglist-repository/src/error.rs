//! Error types for the repository layer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Filename rejected by the path validator
    #[error("Invalid filename: {name}")]
    InvalidFilename { name: String },

    /// Entry value is empty or spans more than one line
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// List file does not exist
    #[error("File not found: {name}")]
    NotFound { name: String },

    /// Entry is already present in the list
    #[error("Entry already exists: {value}")]
    DuplicateEntry { value: String },

    /// Positional index outside the current list
    #[error("Invalid line index: {index} (list has {len} entries)")]
    IndexOutOfRange { index: i64, len: usize },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Base directory could not be used
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Generic error
    #[error("Repository error: {0}")]
    Other(String),
}

impl RepositoryError {
    /// Whether the error was caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RepositoryError::InvalidFilename { .. }
                | RepositoryError::InvalidEntry(_)
                | RepositoryError::NotFound { .. }
                | RepositoryError::DuplicateEntry { .. }
                | RepositoryError::IndexOutOfRange { .. }
        )
    }
}

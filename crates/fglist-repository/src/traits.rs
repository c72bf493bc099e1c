//! Core trait definition for list storage
//!
//! [`ListRepository`] is what the HTTP layer talks to. The only backend is
//! [`FileSystemListRepository`](crate::FileSystemListRepository), but
//! handlers hold a `dyn ListRepository` so they never see the filesystem.
//!
//! # Example
//!
//! ```no_run
//! use fglist_repository::{FileSystemListRepository, ListRepository, RepositoryConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = FileSystemListRepository::new(RepositoryConfig::file_system("lists")).await?;
//!
//! let added = repo.add_entry("domains.txt", "example.com").await?;
//! repo.update_entry("domains.txt", added.index, "example.org").await?;
//!
//! let raw = repo.export("domains.txt").await?;
//! assert_eq!(raw, b"example.org\n");
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::{AddOutcome, DeleteOutcome, ListEntry, RepositoryResult, UpdateOutcome};

/// Storage interface for line-oriented list files
///
/// Filenames are the bare names clients send (`domains.txt`); every method
/// validates them before touching storage. Mutations of one file are
/// serialized, mutations of different files are independent.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Names of all list files, sorted
    async fn list_files(&self) -> RepositoryResult<Vec<String>>;

    /// Entries of a list file in file order
    async fn load_entries(&self, filename: &str) -> RepositoryResult<Vec<ListEntry>>;

    /// Append `value`, creating the file if it does not exist
    async fn add_entry(&self, filename: &str, value: &str) -> RepositoryResult<AddOutcome>;

    /// Replace the entry at `index`
    async fn update_entry(
        &self,
        filename: &str,
        index: usize,
        value: &str,
    ) -> RepositoryResult<UpdateOutcome>;

    /// Remove the entry at `index`
    async fn delete_entry(&self, filename: &str, index: usize) -> RepositoryResult<DeleteOutcome>;

    /// Raw bytes of a list file, unmodified
    async fn export(&self, filename: &str) -> RepositoryResult<Vec<u8>>;
}

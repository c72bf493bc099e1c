//! Storage layer for firewall external-connector list files
//!
//! A list file is a flat `.txt` file holding one entry (IP address, domain,
//! URL) per line. This crate owns every write to those files:
//!
//! - **Path validation**: only flat `*.txt` names inside the base directory
//! - **Entry lists**: trimmed, non-empty, duplicate-free lines addressed by index
//! - **Atomic writes**: per-file lock, timestamped backup, temp file + rename
//! - **Change log**: one shared append-only audit line per mutation
//! - **Export**: the raw bytes of a file, untouched
//!
//! # Quick Start
//!
//! ```no_run
//! use fglist_repository::{FileSystemListRepository, ListRepository, RepositoryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = FileSystemListRepository::new(RepositoryConfig::file_system("lists")).await?;
//!
//!     repo.add_entry("blocked_ips.txt", "203.0.113.7").await?;
//!     for entry in repo.load_entries("blocked_ips.txt").await? {
//!         println!("{}: {}", entry.index, entry.value);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # On-disk layout
//!
//! ```text
//! <base_dir>/
//! ├── domains.txt
//! ├── domains.txt.bak.20240309070501
//! ├── blocked_ips.txt
//! └── change.log
//! ```
//!
//! Locks are in-memory; a single server process is assumed to own the
//! directory.

pub mod changelog;
pub mod config;
pub mod entries;
pub mod error;
pub mod file_system;
pub mod models;
pub mod path;
pub mod traits;
pub mod writer;

// Re-exports - Configuration
pub use config::{MissingFilePolicy, RepositoryConfig, DEFAULT_CHANGE_LOG};

// Re-exports - Error
pub use error::{RepositoryError, RepositoryResult};

// Re-exports - Building blocks
pub use changelog::{ChangeLogEntry, ChangeLogger, ChangeOperation};
pub use entries::{normalize_entry, EntryList};
pub use path::{is_list_filename, resolve_within, validate_filename};
pub use writer::{AtomicWriter, FileLock, LockRegistry, Mutation};

// Re-exports - Repositories
pub use file_system::FileSystemListRepository;
pub use models::*;
pub use traits::*;

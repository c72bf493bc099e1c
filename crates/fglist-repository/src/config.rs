//! Repository configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default name of the shared change log inside the base directory
pub const DEFAULT_CHANGE_LOG: &str = "change.log";

/// How reads treat a list file that does not exist yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFilePolicy {
    /// Reads of an absent file fail with `NotFound`
    #[default]
    NotFound,
    /// Reads of an absent file return an empty list
    Empty,
}

/// Repository configuration
///
/// # Examples
///
/// ```rust
/// use fglist_repository::{MissingFilePolicy, RepositoryConfig};
///
/// let config = RepositoryConfig::file_system("/srv/lists")
///     .with_change_log("/var/log/fglist/change.log")
///     .with_missing_file(MissingFilePolicy::Empty);
///
/// assert_eq!(config.change_log_path().to_str(), Some("/var/log/fglist/change.log"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Directory holding the list files
    pub base_dir: PathBuf,

    /// Change log location (defaults to `<base_dir>/change.log`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_log: Option<PathBuf>,

    /// Read behaviour for absent files
    #[serde(default)]
    pub missing_file: MissingFilePolicy,
}

impl RepositoryConfig {
    /// Create a file system repository configuration
    pub fn file_system(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            change_log: None,
            missing_file: MissingFilePolicy::default(),
        }
    }

    pub fn with_change_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.change_log = Some(path.into());
        self
    }

    pub fn with_missing_file(mut self, policy: MissingFilePolicy) -> Self {
        self.missing_file = policy;
        self
    }

    /// Effective change log path
    pub fn change_log_path(&self) -> PathBuf {
        self.change_log
            .clone()
            .unwrap_or_else(|| default_change_log(&self.base_dir))
    }
}

fn default_change_log(base_dir: &Path) -> PathBuf {
    base_dir.join(DEFAULT_CHANGE_LOG)
}

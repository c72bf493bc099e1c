//! Filename validation
//!
//! Every filename that reaches the repository passes through
//! [`validate_filename`] before any filesystem access. Only flat `.txt`
//! names made of ASCII alphanumerics, `-`, `_` and `.` are accepted.
//! [`resolve_within`] additionally follows symlinks so an existing entry
//! can never point outside the base directory.

use path_absolutize::Absolutize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{RepositoryError, RepositoryResult};

/// Required suffix for list files
pub const LIST_EXTENSION: &str = ".txt";

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Check the syntactic rules for a list filename without touching the disk
pub fn is_list_filename(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(LIST_EXTENSION) else {
        return false;
    };

    !stem.is_empty()
        && !name.contains("..")
        && !name.contains('/')
        && !name.contains('\\')
        && name.chars().all(is_allowed_char)
}

/// Resolve a user supplied filename to a path inside `base_dir`
///
/// `base_dir` is expected to be absolute already (the repository
/// absolutizes it at construction time).
pub fn validate_filename(base_dir: &Path, name: &str) -> RepositoryResult<PathBuf> {
    let invalid = || RepositoryError::InvalidFilename {
        name: name.to_string(),
    };

    if !is_list_filename(name) {
        return Err(invalid());
    }

    let resolved = base_dir
        .join(name)
        .absolutize()
        .map_err(|_| invalid())?
        .to_path_buf();

    if resolved.parent() != Some(base_dir) {
        return Err(invalid());
    }

    Ok(resolved)
}

/// Validate `name` and make sure whatever it currently points at on disk
/// lives directly inside `base_dir`
///
/// `base_dir` must be canonical. An absent file passes, since writes
/// create it in place. A symlink is followed and its target must be a
/// direct child of `base_dir`; dangling links are rejected.
pub async fn resolve_within(base_dir: &Path, name: &str) -> RepositoryResult<PathBuf> {
    let path = validate_filename(base_dir, name)?;
    let invalid = || RepositoryError::InvalidFilename {
        name: name.to_string(),
    };

    match fs::symlink_metadata(&path).await {
        Ok(meta) if meta.file_type().is_symlink() => {
            let target = fs::canonicalize(&path).await.map_err(|_| invalid())?;
            if target.parent() != Some(base_dir) {
                return Err(invalid());
            }
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    Ok(path)
}

//! In-memory view of a list file
//!
//! A list file is one entry per line. Lines are trimmed on load and blank
//! lines are dropped, so the positional index of an entry is its position
//! among the non-blank lines.

use crate::{RepositoryError, RepositoryResult};

/// Trim a user supplied value and check it can be stored as a single entry
pub fn normalize_entry(value: &str) -> RepositoryResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(RepositoryError::InvalidEntry(
            "Empty entries are not allowed".to_string(),
        ));
    }
    if value.contains('\n') || value.contains('\r') {
        return Err(RepositoryError::InvalidEntry(
            "Entries must fit on a single line".to_string(),
        ));
    }

    Ok(value.to_string())
}

/// Ordered, duplicate-free sequence of entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryList {
    entries: Vec<String>,
}

impl EntryList {
    /// Parse raw file content into entries
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Self { entries }
    }

    /// Render entries back to the on-disk format
    ///
    /// One entry per line with a trailing newline; an empty list renders as
    /// an empty string.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }

        let mut out = self.entries.join("\n");
        out.push('\n');
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|e| e == value)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }

    /// Append a value, returning its index
    pub fn add(&mut self, value: &str) -> RepositoryResult<usize> {
        if self.contains(value) {
            return Err(RepositoryError::DuplicateEntry {
                value: value.to_string(),
            });
        }

        self.entries.push(value.to_string());
        Ok(self.entries.len() - 1)
    }

    /// Replace the entry at `index`, returning the previous value
    pub fn update_at(&mut self, index: usize, value: &str) -> RepositoryResult<String> {
        self.check_index(index)?;

        if let Some(pos) = self.entries.iter().position(|e| e == value) {
            if pos != index {
                return Err(RepositoryError::DuplicateEntry {
                    value: value.to_string(),
                });
            }
        }

        Ok(std::mem::replace(&mut self.entries[index], value.to_string()))
    }

    /// Remove the entry at `index`, returning it
    pub fn delete_at(&mut self, index: usize) -> RepositoryResult<String> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    fn check_index(&self, index: usize) -> RepositoryResult<()> {
        if index >= self.entries.len() {
            return Err(RepositoryError::IndexOutOfRange {
                index: index as i64,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<String>> for EntryList {
    fn from(entries: Vec<String>) -> Self {
        Self { entries }
    }
}

//! Data models for the repository layer

use serde::{Deserialize, Serialize};

/// Entry with its positional index at read time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub index: usize,
    pub value: String,
}

impl ListEntry {
    /// Number a plain list of values from zero
    pub fn enumerate(values: Vec<String>) -> Vec<ListEntry> {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| ListEntry { index, value })
            .collect()
    }
}

/// Result of appending an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOutcome {
    /// Index of the new entry
    pub index: usize,
    /// Stored (trimmed) value
    pub value: String,
}

/// Result of replacing an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub index: usize,
    pub old_value: String,
    pub new_value: String,
}

/// Result of removing an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// Index the entry occupied before removal
    pub index: usize,
    pub deleted_value: String,
}

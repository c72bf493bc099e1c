//! REST API type definitions
//!
//! Request and response types for the REST API endpoints.

use fglist_repository::{
    AddOutcome, DeleteOutcome, ListEntry, ListRepository, UpdateOutcome,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ListRepository>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Body of add and update requests
#[derive(Debug, Deserialize)]
pub struct EntryValuePayload {
    pub value: String,
}

/// `GET /api/files` response
#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<String>,
}

/// `GET /api/files/{filename}` response
#[derive(Debug, Serialize)]
pub struct FileEntriesResponse {
    pub filename: String,
    pub entries: Vec<ListEntry>,
    pub count: usize,
}

impl FileEntriesResponse {
    pub fn new(filename: String, entries: Vec<ListEntry>) -> Self {
        let count = entries.len();
        Self {
            filename,
            entries,
            count,
        }
    }
}

/// `POST /api/files/{filename}` response
#[derive(Debug, Serialize)]
pub struct AddEntryResponse {
    pub success: bool,
    pub index: usize,
    pub value: String,
}

impl From<AddOutcome> for AddEntryResponse {
    fn from(outcome: AddOutcome) -> Self {
        Self {
            success: true,
            index: outcome.index,
            value: outcome.value,
        }
    }
}

/// `PUT /api/files/{filename}/{index}` response
#[derive(Debug, Serialize)]
pub struct UpdateEntryResponse {
    pub success: bool,
    pub index: usize,
    pub old_value: String,
    pub new_value: String,
}

impl From<UpdateOutcome> for UpdateEntryResponse {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            success: true,
            index: outcome.index,
            old_value: outcome.old_value,
            new_value: outcome.new_value,
        }
    }
}

/// `DELETE /api/files/{filename}/{index}` response
#[derive(Debug, Serialize)]
pub struct DeleteEntryResponse {
    pub success: bool,
    pub index: usize,
    pub deleted_value: String,
}

impl From<DeleteOutcome> for DeleteEntryResponse {
    fn from(outcome: DeleteOutcome) -> Self {
        Self {
            success: true,
            index: outcome.index,
            deleted_value: outcome.deleted_value,
        }
    }
}

//! API endpoint handlers
//!
//! HTTP request handlers for all REST API endpoints.

use super::extractors::{JsonExtractor, PathExtractor};
use super::types::*;
use crate::error::ServerError;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::info;

/// Bundled single page UI
const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Entry indexes arrive signed so a negative one is reported, not rejected by routing
pub(super) fn entry_index(index: i64) -> Result<usize, ServerError> {
    usize::try_from(index)
        .map_err(|_| ServerError::InvalidRequest(format!("Invalid line index: {}", index)))
}

/// Web UI
pub(super) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List all list files
pub(super) async fn list_files(
    State(state): State<AppState>,
) -> Result<Json<FileListResponse>, ServerError> {
    let files = state.repository.list_files().await?;
    Ok(Json(FileListResponse { files }))
}

/// Entries of one file with their indexes
pub(super) async fn get_file_entries(
    State(state): State<AppState>,
    PathExtractor(filename): PathExtractor<String>,
) -> Result<Json<FileEntriesResponse>, ServerError> {
    let entries = state.repository.load_entries(&filename).await?;
    Ok(Json(FileEntriesResponse::new(filename, entries)))
}

/// Append an entry
#[axum::debug_handler]
pub(super) async fn add_entry(
    State(state): State<AppState>,
    PathExtractor(filename): PathExtractor<String>,
    JsonExtractor(payload): JsonExtractor<EntryValuePayload>,
) -> Result<Json<AddEntryResponse>, ServerError> {
    info!("Received add request for {}", filename);

    let outcome = state.repository.add_entry(&filename, &payload.value).await?;
    Ok(Json(outcome.into()))
}

/// Replace the entry at an index
#[axum::debug_handler]
pub(super) async fn update_entry(
    State(state): State<AppState>,
    PathExtractor((filename, index)): PathExtractor<(String, i64)>,
    JsonExtractor(payload): JsonExtractor<EntryValuePayload>,
) -> Result<Json<UpdateEntryResponse>, ServerError> {
    info!("Received update request for {} index {}", filename, index);

    let index = entry_index(index)?;
    let outcome = state
        .repository
        .update_entry(&filename, index, &payload.value)
        .await?;
    Ok(Json(outcome.into()))
}

/// Remove the entry at an index
pub(super) async fn delete_entry(
    State(state): State<AppState>,
    PathExtractor((filename, index)): PathExtractor<(String, i64)>,
) -> Result<Json<DeleteEntryResponse>, ServerError> {
    info!("Received delete request for {} index {}", filename, index);

    let index = entry_index(index)?;
    let outcome = state.repository.delete_entry(&filename, index).await?;
    Ok(Json(outcome.into()))
}

/// Raw file content for the firewall external connector
pub(super) async fn export_file(
    State(state): State<AppState>,
    PathExtractor(filename): PathExtractor<String>,
) -> Result<Response, ServerError> {
    let bytes = state.repository.export(&filename).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        bytes,
    )
        .into_response())
}

//! Router creation and configuration
//!
//! Creates the Axum router for the UI, the JSON API and the export endpoint.

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, put},
    Router,
};
use fglist_repository::ListRepository;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create REST API router
pub fn create_router(repository: Arc<dyn ListRepository>) -> Router {
    let state = AppState { repository };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/files", get(list_files))
        .route("/api/files/:filename", get(get_file_entries).post(add_entry))
        .route(
            "/api/files/:filename/:index",
            put(update_entry).delete(delete_entry),
        )
        .route("/export/:filename", get(export_file))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

//! Integration tests for REST API endpoints
//!
//! These tests create a real file system repository in a temp directory and
//! drive the router end-to-end.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fglist_repository::{FileSystemListRepository, MissingFilePolicy, RepositoryConfig};
use fglist_server::api::create_router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;
use tower::ServiceExt;

/// Helper to create the app router over a temp directory
async fn create_test_app() -> (TempDir, Router) {
    create_test_app_with(|config| config).await
}

async fn create_test_app_with(
    configure: impl FnOnce(RepositoryConfig) -> RepositoryConfig,
) -> (TempDir, Router) {
    let temp_dir = TempDir::new().unwrap();
    let config = configure(RepositoryConfig::file_system(temp_dir.path()));
    let repository = FileSystemListRepository::new(config).await.unwrap();
    (temp_dir, create_router(Arc::new(repository)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn write_list(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).await.unwrap();
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_temp, app) = create_test_app().await;

    let (status, json) = send_json(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_index_serves_html() {
    let (_temp, app) = create_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("FortiGate List Manager"));
}

#[tokio::test]
async fn test_list_files() {
    let (temp, app) = create_test_app().await;
    write_list(temp.path(), "domains.txt", "a.example\n").await;
    write_list(temp.path(), "ips.txt", "10.0.0.1\n").await;
    write_list(temp.path(), "ips.txt.bak.20240101000000", "").await;
    write_list(temp.path(), "change.log", "").await;

    let (status, json) = send_json(&app, Method::GET, "/api/files", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"files": ["domains.txt", "ips.txt"]}));
}

#[tokio::test]
async fn test_get_file_entries() {
    let (temp, app) = create_test_app().await;
    write_list(temp.path(), "x.txt", "a\n\n  b \nc\n").await;

    let (status, json) = send_json(&app, Method::GET, "/api/files/x.txt", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "filename": "x.txt",
            "entries": [
                {"index": 0, "value": "a"},
                {"index": 1, "value": "b"},
                {"index": 2, "value": "c"}
            ],
            "count": 3
        })
    );
}

#[tokio::test]
async fn test_get_missing_file_is_404() {
    let (_temp, app) = create_test_app().await;

    let (status, json) = send_json(&app, Method::GET, "/api/files/missing.txt", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert!(json["error"].as_str().unwrap().contains("missing.txt"));
}

#[tokio::test]
async fn test_get_missing_file_empty_when_configured() {
    let (_temp, app) =
        create_test_app_with(|c| c.with_missing_file(MissingFilePolicy::Empty)).await;

    let (status, json) = send_json(&app, Method::GET, "/api/files/missing.txt", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn test_invalid_filename_is_400() {
    let (_temp, app) = create_test_app().await;

    for uri in [
        "/api/files/file.exe",
        "/api/files/..%2F..%2Fetc%2Fpasswd",
        "/export/notes.md",
    ] {
        let (status, json) = send_json(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(json["error"].as_str().unwrap().contains("Invalid filename"));
    }
}

#[tokio::test]
async fn test_add_entry_creates_file() {
    let (temp, app) = create_test_app().await;

    let (status, json) = send_json(
        &app,
        Method::POST,
        "/api/files/new.txt",
        Some(json!({"value": "  203.0.113.9  "})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": true, "index": 0, "value": "203.0.113.9"}));
    assert_eq!(
        fs::read_to_string(temp.path().join("new.txt")).await.unwrap(),
        "203.0.113.9\n"
    );

    let log = fs::read_to_string(temp.path().join("change.log")).await.unwrap();
    assert!(log.trim_end().ends_with("] [new.txt] [ADD] [203.0.113.9]"));
}

#[tokio::test]
async fn test_add_duplicate_is_409_and_file_unchanged() {
    let (temp, app) = create_test_app().await;
    write_list(temp.path(), "x.txt", "a\nb\n").await;

    let (status, json) =
        send_json(&app, Method::POST, "/api/files/x.txt", Some(json!({"value": "b"}))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("already exists"));
    assert_eq!(
        fs::read_to_string(temp.path().join("x.txt")).await.unwrap(),
        "a\nb\n"
    );
}

#[tokio::test]
async fn test_add_empty_value_is_400() {
    let (_temp, app) = create_test_app().await;

    let (status, _) =
        send_json(&app, Method::POST, "/api/files/x.txt", Some(json!({"value": "  "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_malformed_body_is_400() {
    let (_temp, app) = create_test_app().await;

    let (status, json) =
        send_json(&app, Method::POST, "/api/files/x.txt", Some(json!({"val": "x"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Invalid JSON data"));
}

#[tokio::test]
async fn test_update_entry_scenario() {
    let (temp, app) = create_test_app().await;
    write_list(temp.path(), "x.txt", "a\nb\nc\n").await;

    let (status, json) =
        send_json(&app, Method::PUT, "/api/files/x.txt/1", Some(json!({"value": "B"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"success": true, "index": 1, "old_value": "b", "new_value": "B"})
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("x.txt")).await.unwrap(),
        "a\nB\nc\n"
    );

    let log = fs::read_to_string(temp.path().join("change.log")).await.unwrap();
    assert!(log.trim_end().ends_with("] [x.txt] [UPDATE] [b -> B]"));

    let mut backups = Vec::new();
    let mut dir = fs::read_dir(temp.path()).await.unwrap();
    while let Some(entry) = dir.next_entry().await.unwrap() {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with("x.txt.bak.") {
            backups.push(entry.path());
        }
    }
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).await.unwrap(), "a\nb\nc\n");
}

#[tokio::test]
async fn test_update_index_errors() {
    let (temp, app) = create_test_app().await;
    write_list(temp.path(), "x.txt", "a\n").await;

    let (status, _) =
        send_json(&app, Method::PUT, "/api/files/x.txt/5", Some(json!({"value": "z"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        send_json(&app, Method::PUT, "/api/files/x.txt/-1", Some(json!({"value": "z"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) =
        send_json(&app, Method::PUT, "/api/files/x.txt/abc", Some(json!({"value": "z"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);

    let (status, _) = send_json(
        &app,
        Method::PUT,
        "/api/files/absent.txt/0",
        Some(json!({"value": "z"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_entry() {
    let (temp, app) = create_test_app().await;
    write_list(temp.path(), "x.txt", "a\nb\nc\n").await;

    let (status, json) = send_json(&app, Method::DELETE, "/api/files/x.txt/0", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": true, "index": 0, "deleted_value": "a"}));

    let (_, json) = send_json(&app, Method::GET, "/api/files/x.txt", None).await;
    assert_eq!(json["entries"][0], json!({"index": 0, "value": "b"}));
    assert_eq!(json["count"], 2);

    let (status, _) = send_json(&app, Method::DELETE, "/api/files/x.txt/9", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_export_returns_exact_bytes() {
    let (temp, app) = create_test_app().await;
    let raw = "  a.example  \r\n\n\nb.example\n\n";
    write_list(temp.path(), "domains.txt", raw).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/export/domains.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body.as_ref(), raw.as_bytes());

    let (status, _) = send(&app, Method::GET, "/export/absent.txt", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_posts_are_all_applied() {
    let (_temp, app) = create_test_app().await;

    let mut handles = Vec::new();
    for i in 0..20 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            send(
                &app,
                Method::POST,
                "/api/files/shared.txt",
                Some(json!({"value": format!("10.0.0.{}", i)})),
            )
            .await
            .0
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let (_, json) = send_json(&app, Method::GET, "/api/files/shared.txt", None).await;
    assert_eq!(json["count"], 20);
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_leaving_base_dir_is_400() {
    let (temp, app) = create_test_app().await;
    let outside = TempDir::new().unwrap();
    fs::write(outside.path().join("secret"), "TOPSECRET\n").await.unwrap();
    std::os::unix::fs::symlink(outside.path().join("secret"), temp.path().join("leak.txt"))
        .unwrap();

    let (_, json) = send_json(&app, Method::GET, "/api/files", None).await;
    assert_eq!(json, json!({"files": []}));

    for uri in ["/api/files/leak.txt", "/export/leak.txt"] {
        let (status, json) = send_json(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json["status"], 400);
    }
}

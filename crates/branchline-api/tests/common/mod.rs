//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use branchline_content::application::loader::{FileSpecLoader, SpecLoader};
use http_body_util::BodyExt;
use tower::ServiceExt;

use branchline_api::build_router;
use branchline_api::state::AppState;

/// Build the full app router over `loader`. Uses the same routes as `main.rs`.
pub fn build_test_app(loader: impl SpecLoader + 'static) -> Router {
    build_router(AppState::new(Arc::new(loader)))
}

/// Path of the content document shipped with the repository.
pub fn shipped_content_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../content/game.json")
}

/// Build the app over the shipped content document.
pub fn build_shipped_app() -> Router {
    build_test_app(FileSpecLoader::new(shipped_content_path()).unwrap())
}

/// Send a GET request and return status, headers and JSON body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, headers, json)
}

/// Send a GET request and return the status and JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, _, json) = get(app, uri).await;
    (status, json)
}

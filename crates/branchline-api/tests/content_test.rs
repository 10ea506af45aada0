//! Integration tests for the content document routes.

mod common;

use async_trait::async_trait;
use axum::http::{StatusCode, header};
use branchline_content::application::loader::SpecLoader;
use branchline_content::domain::spec::GameSpec;
use branchline_content::error::ContentError;
use branchline_test_support::{FailingSpecLoader, FixedSpecLoader};
use branchline_test_support::fixtures::two_scene_spec;

/// A loader whose document is not valid JSON.
struct MalformedSpecLoader;

#[async_trait]
impl SpecLoader for MalformedSpecLoader {
    async fn fetch(&self) -> Result<GameSpec, ContentError> {
        GameSpec::from_json_str(r#"{ "start": "s1", "scenes": "#)
    }
}

#[tokio::test]
async fn test_game_document_is_served_uncached() {
    // Arrange
    let app = common::build_test_app(FixedSpecLoader(two_scene_spec()));

    // Act
    let (status, headers, json) = common::get(app, "/content/game.json").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    assert_eq!(json["start"], "s1");
    assert_eq!(json["scenes"]["s1"]["type"], "choices");
    assert_eq!(json["scenes"]["s1"]["choices"][0]["effect"]["customer"], 10);
    assert_eq!(json["scenes"]["s2"]["type"], "result");
}

#[tokio::test]
async fn test_served_document_parses_back_into_the_same_spec() {
    let app = common::build_test_app(FixedSpecLoader(two_scene_spec()));

    let (_, _, json) = common::get(app, "/content/game.json").await;

    let reparsed = GameSpec::from_json_str(&json.to_string()).unwrap();
    assert_eq!(reparsed, two_scene_spec());
}

#[tokio::test]
async fn test_missing_document_returns_404() {
    let app = common::build_test_app(FailingSpecLoader);

    let (status, json) = common::get_json(app, "/content/game.json").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "content_not_found");
    assert!(json["message"].as_str().unwrap().contains("missing.json"));
}

#[tokio::test]
async fn test_malformed_document_returns_500() {
    let app = common::build_test_app(MalformedSpecLoader);

    let (status, json) = common::get_json(app, "/content/game.json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "content_malformed");
}

#[tokio::test]
async fn test_shipped_content_is_served_and_has_no_defects() {
    // Arrange
    let app = common::build_shipped_app();

    // Act
    let (status, headers, report) = common::get(app, "/content/validation").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    assert_eq!(report["defects"], serde_json::json!([]));
    assert_eq!(report["scene_count"], report["reachable"].as_array().unwrap().len());
    assert_eq!(report["reachable"][0], report["start"]);
    assert_eq!(report["fingerprint"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_validation_reports_authoring_defects() {
    let spec = GameSpec::from_json_str(
        r#"{
            "start": "s1",
            "scenes": {
                "s1": { "id": "s1", "type": "choices", "choices": [
                    { "id": "c1", "label": "Go", "next": "nowhere" }
                ] },
                "s2": { "id": "s2", "type": "result" }
            }
        }"#,
    )
    .unwrap();
    let app = common::build_test_app(FixedSpecLoader(spec));

    let (status, report) = common::get_json(app, "/content/validation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["reachable"], serde_json::json!(["s1"]));
    let defects = report["defects"].as_array().unwrap();
    assert!(
        defects
            .iter()
            .any(|d| d.as_str().unwrap().contains("nowhere"))
    );
    assert!(defects.iter().any(|d| d.as_str().unwrap().contains("s2")));
}

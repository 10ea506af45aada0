//! Content document routes.
//!
//! The document is re-read on every request and served with
//! `Cache-Control: no-store`, so edits reach the next player load without a
//! restart and no intermediary keeps a stale copy.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Json, Router, routing::get};
use branchline_content::domain::spec::GameSpec;
use branchline_content::domain::validation::{reachable_scenes, validate};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Authoring report for the current content document.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// SHA-256 of the canonical encoding.
    pub fingerprint: String,
    /// Start scene id.
    pub start: String,
    /// Number of scenes.
    pub scene_count: usize,
    /// Scene ids reachable from the start scene, in visit order.
    pub reachable: Vec<String>,
    /// One message per authoring defect. Empty for clean content.
    pub defects: Vec<String>,
}

impl ValidationReport {
    fn of(spec: &GameSpec) -> Self {
        Self {
            fingerprint: spec.fingerprint(),
            start: spec.start.clone(),
            scene_count: spec.scenes.len(),
            reachable: reachable_scenes(spec).into_iter().map(str::to_owned).collect(),
            defects: validate(spec).iter().map(ToString::to_string).collect(),
        }
    }
}

/// GET /content/game.json
#[instrument(skip(state))]
async fn get_game(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let spec = state.loader.fetch().await?;
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(spec)))
}

/// GET /content/validation
#[instrument(skip(state))]
async fn get_validation(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let spec = state.loader.fetch().await?;
    let report = ValidationReport::of(&spec);
    if !report.defects.is_empty() {
        warn!(defects = report.defects.len(), "content has authoring defects");
    }
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(report)))
}

/// Returns the router for the content document.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/game.json", get(get_game))
        .route("/validation", get(get_validation))
}

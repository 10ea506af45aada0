//! Branchline content host.
//!
//! Serves the content document the player loads at start-up, a validation
//! report for authors, and a health probe. No game logic runs here.

use axum::Router;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use state::AppState;

/// Assembles every route over `state`. Middleware is layered by the binary.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/content", routes::content::router())
        .with_state(state)
}

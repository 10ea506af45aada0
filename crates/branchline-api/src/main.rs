//! Branchline content host entry point.

use std::sync::Arc;

use branchline_api::build_router;
use branchline_api::config::AppConfig;
use branchline_api::error::AppError;
use branchline_api::state::AppState;
use branchline_content::application::loader::{FileSpecLoader, SpecLoader};
use branchline_content::domain::validation::validate;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Branchline content host");

    let config = AppConfig::from_env()?;
    let loader = FileSpecLoader::new(&config.content_path)?;

    // Report the content revision up front; serving continues even if it is
    // missing, since the file is re-read per request.
    match loader.fetch().await {
        Ok(spec) => {
            for defect in validate(&spec) {
                tracing::warn!(%defect, "content defect");
            }
            tracing::info!(
                path = %config.content_path.display(),
                fingerprint = %spec.fingerprint(),
                scenes = spec.scenes.len(),
                "content available"
            );
        }
        Err(error) => tracing::error!(%error, "content not loadable at startup"),
    }

    // TODO: Replace CorsLayer::permissive() with the player's origin once it is hosted separately.
    let app = build_router(AppState::new(Arc::new(loader)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}

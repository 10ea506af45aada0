//! Shared application state.

use std::sync::Arc;

use branchline_content::application::loader::SpecLoader;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of the content document. Read afresh on every request.
    pub loader: Arc<dyn SpecLoader>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(loader: Arc<dyn SpecLoader>) -> Self {
        Self { loader }
    }
}

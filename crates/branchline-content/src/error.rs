//! Content error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain or decode a content document.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The document could not be read.
    #[error("failed to read content from {path}: {source}")]
    Io {
        /// Location that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON for the content schema.
    #[error("invalid JSON content: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML for the content schema.
    #[error("invalid YAML content: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension maps to no known content format.
    #[error("unsupported content format: {0}")]
    UnsupportedFormat(String),
}

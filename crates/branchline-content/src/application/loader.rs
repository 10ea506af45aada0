//! Content loading seam.
//!
//! A session fetches its content exactly once, at start-up, through a
//! `SpecLoader`. Loaders never cache: every `fetch` reads the source afresh.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::domain::spec::{ContentFormat, GameSpec};
use crate::error::ContentError;

/// Read-only source of a content document.
#[async_trait]
pub trait SpecLoader: Send + Sync {
    /// Fetches and decodes the document.
    async fn fetch(&self) -> Result<GameSpec, ContentError>;
}

/// Loads content from a file on disk, re-reading it on every fetch.
#[derive(Debug, Clone)]
pub struct FileSpecLoader {
    path: PathBuf,
    format: ContentFormat,
}

impl FileSpecLoader {
    /// Creates a loader for `path`, inferring the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::UnsupportedFormat` for unknown extensions.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ContentError> {
        let path = path.into();
        let format = ContentFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    /// The file this loader reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The format the file is decoded as.
    #[must_use]
    pub fn format(&self) -> ContentFormat {
        self.format
    }
}

#[async_trait]
impl SpecLoader for FileSpecLoader {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<GameSpec, ContentError> {
        let source = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ContentError::Io {
                path: self.path.clone(),
                source,
            })?;
        let spec = GameSpec::parse(&source, self.format)?;
        debug!(
            start = %spec.start,
            scenes = spec.scenes.len(),
            fingerprint = %spec.fingerprint(),
            "content loaded"
        );
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("branchline-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_fetch_reads_json_file() {
        // Arrange
        let path = scratch_file(
            "fetch.json",
            r#"{ "start": "end", "scenes": { "end": { "id": "end", "type": "result" } } }"#,
        );
        let loader = FileSpecLoader::new(&path).unwrap();

        // Act
        let spec = loader.fetch().await.unwrap();

        // Assert
        assert_eq!(spec.start, "end");
        assert_eq!(loader.format(), ContentFormat::Json);
    }

    #[tokio::test]
    async fn test_fetch_rereads_file_every_time() {
        // Arrange
        let path = scratch_file(
            "reread.yaml",
            "start: a\nscenes:\n  a:\n    id: a\n    type: result\n",
        );
        let loader = FileSpecLoader::new(&path).unwrap();
        let first = loader.fetch().await.unwrap();

        // Act
        std::fs::write(&path, "start: b\nscenes:\n  b:\n    id: b\n    type: result\n").unwrap();
        let second = loader.fetch().await.unwrap();

        // Assert
        assert_eq!(first.start, "a");
        assert_eq!(second.start, "b");
    }

    #[tokio::test]
    async fn test_fetch_missing_file_returns_io_error() {
        // Arrange
        let loader = FileSpecLoader::new("/definitely/not/here/game.json").unwrap();

        // Act
        let result = loader.fetch().await;

        // Assert
        match result {
            Err(ContentError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("/definitely/not/here/game.json"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_file_returns_parse_error() {
        // Arrange
        let path = scratch_file("broken.json", "{ not json");
        let loader = FileSpecLoader::new(&path).unwrap();

        // Act
        let result = loader.fetch().await;

        // Assert
        assert!(matches!(result, Err(ContentError::Json(_))));
    }

    #[test]
    fn test_new_rejects_unknown_extension() {
        let result = FileSpecLoader::new("content/game.txt");

        assert!(matches!(result, Err(ContentError::UnsupportedFormat(_))));
    }
}

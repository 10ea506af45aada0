//! Test loaders: `SpecLoader` doubles.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use branchline_content::application::loader::SpecLoader;
use branchline_content::domain::spec::GameSpec;
use branchline_content::error::ContentError;

/// A loader that hands out a clone of the same spec on every fetch.
#[derive(Debug, Clone)]
pub struct FixedSpecLoader(pub GameSpec);

#[async_trait]
impl SpecLoader for FixedSpecLoader {
    async fn fetch(&self) -> Result<GameSpec, ContentError> {
        Ok(self.0.clone())
    }
}

/// A loader that always reports the content file as missing.
#[derive(Debug)]
pub struct FailingSpecLoader;

#[async_trait]
impl SpecLoader for FailingSpecLoader {
    async fn fetch(&self) -> Result<GameSpec, ContentError> {
        Err(ContentError::Io {
            path: PathBuf::from("content/missing.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        })
    }
}

/// A loader whose fetch never completes. Useful for cancellation tests.
#[derive(Debug)]
pub struct PendingSpecLoader;

#[async_trait]
impl SpecLoader for PendingSpecLoader {
    async fn fetch(&self) -> Result<GameSpec, ContentError> {
        std::future::pending().await
    }
}

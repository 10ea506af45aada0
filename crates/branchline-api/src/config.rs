//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

/// Default location of the content document.
pub const DEFAULT_CONTENT_PATH: &str = "content/game.json";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Content file (`CONTENT_PATH`).
    pub content_path: PathBuf,
    /// Bind host (`HOST`).
    pub host: String,
    /// Bind port (`PORT`).
    pub port: u16,
}

impl AppConfig {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset
    /// or empty keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is not a valid port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            content_path: get("CONTENT_PATH")
                .map_or_else(|| DEFAULT_CONTENT_PATH.into(), PathBuf::from),
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
        })
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

//! Error types for the bridge.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while talking to Flickr, bit.ly or Twitter.
#[derive(Debug, Error)]
pub enum BotError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote API answered with a non-success status
    #[error("{service} API error ({status}): {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Local file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for [`crate::config::BotConfig`]
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required key is absent or blank
    #[error("config key '{0}' is missing or empty")]
    Missing(&'static str),
}

/// Convenience alias used across the crate.
pub type Result<T, E = BotError> = std::result::Result<T, E>;

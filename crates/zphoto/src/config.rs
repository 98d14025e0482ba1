//! Static bot configuration.
//!
//! Loaded once from a JSON file at startup and passed by reference into every
//! component. Nothing mutates it afterwards.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Default Flickr REST endpoint.
pub const DEFAULT_FLICKR_API_URL: &str = "https://api.flickr.com/services/rest/";

/// Default Twitter API host.
pub const DEFAULT_TWITTER_API_URL: &str = "https://api.twitter.com";

/// Default bit.ly API host.
pub const DEFAULT_BITLY_API_URL: &str = "https://api-ssl.bitly.com";

/// Base of the long-form photo page links.
pub const DEFAULT_PHOTO_PAGE_BASE: &str = "http://www.flickr.com/photos";

/// Prefix for locally computed short links.
pub const DEFAULT_SHORT_URL_BASE: &str = "http://flic.kr/p/";

/// Default per-request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Bridge configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Flickr API key.
    pub flickr_api_key: String,
    /// Flickr group whose pool is watched.
    pub flickr_group_id: String,
    /// Twitter OAuth consumer key.
    pub twitter_consumer_key: String,
    /// Twitter OAuth consumer secret.
    pub twitter_consumer_secret: String,
    /// Twitter OAuth access token.
    pub twitter_access_token: String,
    /// Twitter OAuth access token secret.
    pub twitter_access_secret: String,
    /// bit.ly login. Shortening is skipped unless both bit.ly keys are set.
    #[serde(default)]
    pub bitly_login: Option<String>,
    /// bit.ly API key.
    #[serde(default)]
    pub bitly_api_key: Option<String>,
    #[serde(default = "default_flickr_api_url")]
    pub flickr_api_url: String,
    #[serde(default = "default_twitter_api_url")]
    pub twitter_api_url: String,
    #[serde(default = "default_bitly_api_url")]
    pub bitly_api_url: String,
    #[serde(default = "default_photo_page_base")]
    pub photo_page_base: String,
    #[serde(default = "default_short_url_base")]
    pub short_url_base: String,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_flickr_api_url() -> String {
    DEFAULT_FLICKR_API_URL.to_string()
}

fn default_twitter_api_url() -> String {
    DEFAULT_TWITTER_API_URL.to_string()
}

fn default_bitly_api_url() -> String {
    DEFAULT_BITLY_API_URL.to_string()
}

fn default_photo_page_base() -> String {
    DEFAULT_PHOTO_PAGE_BASE.to_string()
}

fn default_short_url_base() -> String {
    DEFAULT_SHORT_URL_BASE.to_string()
}

const fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

impl BotConfig {
    /// Load and validate configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: "<inline>".into(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("flickr_api_key", &self.flickr_api_key),
            ("flickr_group_id", &self.flickr_group_id),
            ("twitter_consumer_key", &self.twitter_consumer_key),
            ("twitter_consumer_secret", &self.twitter_consumer_secret),
            ("twitter_access_token", &self.twitter_access_token),
            ("twitter_access_secret", &self.twitter_access_secret),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(key));
            }
        }
        Ok(())
    }

    /// bit.ly credentials, when both halves are present and non-blank.
    #[must_use]
    pub fn bitly_credentials(&self) -> Option<(&str, &str)> {
        match (&self.bitly_login, &self.bitly_api_key) {
            (Some(login), Some(key)) if !login.trim().is_empty() && !key.trim().is_empty() => {
                Some((login.as_str(), key.as_str()))
            }
            _ => None,
        }
    }

    /// Timeout applied to every outbound request.
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Build the shared HTTP client.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.http_timeout())
            .user_agent(concat!("zphoto/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}

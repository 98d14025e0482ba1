//! Short links for pool photos.
//!
//! Tries bit.ly first and falls back to a locally computed `flic.kr` link,
//! so link resolution never fails.

pub mod base58;
mod bitly;

pub use bitly::{BitlyClient, LinkShortener};

use std::sync::Arc;

use crate::config::BotConfig;
use crate::flickr::Photo;

/// Resolves the short URL used in a photo's status message.
pub struct ShortLinkResolver {
    shortener: Option<Arc<dyn LinkShortener>>,
    photo_page_base: String,
    short_url_base: String,
    group_id: String,
}

impl ShortLinkResolver {
    /// Create a resolver using bit.ly when `config` carries credentials.
    #[must_use]
    pub fn from_config(config: &BotConfig, client: reqwest::Client) -> Self {
        let shortener = config.bitly_credentials().map(|(login, key)| {
            Arc::new(BitlyClient::new(client, &config.bitly_api_url, login, key))
                as Arc<dyn LinkShortener>
        });
        if shortener.is_none() {
            tracing::info!("bit.ly not configured - using flic.kr links");
        }
        Self::new(config, shortener)
    }

    /// Create a resolver with an explicit shortener.
    #[must_use]
    pub fn new(config: &BotConfig, shortener: Option<Arc<dyn LinkShortener>>) -> Self {
        Self {
            shortener,
            photo_page_base: config.photo_page_base.trim_end_matches('/').to_string(),
            short_url_base: config.short_url_base.clone(),
            group_id: config.flickr_group_id.clone(),
        }
    }

    /// Canonical photo page link within the pool.
    #[must_use]
    pub fn long_url(&self, photo: &Photo) -> String {
        format!(
            "{}/{}/{}/in/pool-{}",
            self.photo_page_base, photo.owner, photo.id, self.group_id
        )
    }

    /// Locally computed `flic.kr` short link.
    #[must_use]
    pub fn fallback_url(&self, photo: &Photo) -> String {
        format!("{}{}", self.short_url_base, base58::encode(photo.numeric_id()))
    }

    /// Short link for `photo`; external shortener first, then the fallback.
    pub async fn resolve(&self, photo: &Photo) -> String {
        let Some(shortener) = &self.shortener else {
            return self.fallback_url(photo);
        };

        let long_url = self.long_url(photo);
        match shortener.shorten(&long_url).await {
            Ok(short) => short,
            Err(e) => {
                let fallback = self.fallback_url(photo);
                tracing::warn!(
                    id = %photo.id,
                    shortener = shortener.name(),
                    error = %e,
                    fallback = %fallback,
                    "Link shortening failed - using fallback"
                );
                fallback
            }
        }
    }
}

//! Twitter REST client for status updates and profile images.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

use super::oauth::OAuthCredentials;
use crate::config::BotConfig;
use crate::error::{BotError, Result};

/// Destination for status messages and the profile image.
#[async_trait]
pub trait StatusPublisher: Send + Sync {
    /// Get the name of this publisher.
    fn name(&self) -> &'static str;

    /// Post a status message.
    async fn post_status(&self, text: &str) -> Result<()>;

    /// Replace the account's profile image with JPEG bytes.
    async fn update_profile_image(&self, image: Vec<u8>) -> Result<()>;
}

/// OAuth 1.0a signed Twitter client.
pub struct TwitterClient {
    client: Client,
    api_url: String,
    credentials: OAuthCredentials,
}

impl TwitterClient {
    /// Create a client for the account in `config`.
    #[must_use]
    pub fn new(client: Client, config: &BotConfig) -> Self {
        Self {
            client,
            api_url: config.twitter_api_url.trim_end_matches('/').to_string(),
            credentials: OAuthCredentials::from_config(config),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/1.1/{path}", self.api_url)
    }

    async fn check(response: Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".into());
        Err(BotError::Api {
            service: "Twitter",
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl StatusPublisher for TwitterClient {
    fn name(&self) -> &'static str {
        "twitter"
    }

    async fn post_status(&self, text: &str) -> Result<()> {
        let url = self.endpoint("statuses/update.json");
        let params = [("status", text)];
        let auth = self.credentials.authorization_header("POST", &url, &params);

        tracing::debug!(status = %text, "Posting status");
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .form(&params)
            .send()
            .await?;

        Self::check(response).await
    }

    async fn update_profile_image(&self, image: Vec<u8>) -> Result<()> {
        let url = self.endpoint("account/update_profile_image.json");
        let auth = self.credentials.authorization_header("POST", &url, &[]);

        let filename = profile_image_filename(Utc::now());
        tracing::debug!(bytes = image.len(), filename = %filename, "Uploading profile image");

        let part = Part::bytes(image)
            .file_name(filename)
            .mime_str("image/jpeg")?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .multipart(form)
            .send()
            .await?;

        Self::check(response).await
    }
}

/// Publisher that only logs, used for `--dry-run`.
#[derive(Debug, Default)]
pub struct DryRunPublisher;

#[async_trait]
impl StatusPublisher for DryRunPublisher {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    async fn post_status(&self, text: &str) -> Result<()> {
        tracing::info!(status = %text, "[dry-run] Would post status");
        Ok(())
    }

    async fn update_profile_image(&self, image: Vec<u8>) -> Result<()> {
        tracing::info!(bytes = image.len(), "[dry-run] Would update profile image");
        Ok(())
    }
}

/// Upload name for a profile image taken at `now`.
#[must_use]
pub fn profile_image_filename(now: DateTime<Utc>) -> String {
    format!("profile_image_{}.jpg", now.timestamp())
}

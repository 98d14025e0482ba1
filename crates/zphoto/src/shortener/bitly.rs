//! bit.ly v3 shorten API client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::{BotError, Result};

/// External link shortening service.
#[async_trait]
pub trait LinkShortener: Send + Sync {
    /// Get the name of this shortener.
    fn name(&self) -> &'static str;

    /// Shorten `long_url`, failing on anything but a clean success.
    async fn shorten(&self, long_url: &str) -> Result<String>;
}

/// bit.ly client using the plain-text `format=txt` response.
pub struct BitlyClient {
    client: Client,
    api_url: String,
    login: String,
    api_key: String,
}

impl BitlyClient {
    /// Create a new bit.ly client.
    #[must_use]
    pub fn new(client: Client, api_url: &str, login: &str, api_key: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            login: login.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl LinkShortener for BitlyClient {
    fn name(&self) -> &'static str {
        "bitly"
    }

    async fn shorten(&self, long_url: &str) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/v3/shorten", self.api_url))
            .query(&[
                ("login", self.login.as_str()),
                ("apiKey", self.api_key.as_str()),
                ("longUrl", long_url),
                ("format", "txt"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(BotError::Api {
                service: "bit.ly",
                status: status.as_u16(),
                body,
            });
        }

        let short = body.trim();
        if short.is_empty() {
            return Err(BotError::Api {
                service: "bit.ly",
                status: status.as_u16(),
                body: "empty response body".to_string(),
            });
        }

        Ok(short.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LONG: &str = "http://www.flickr.com/photos/99806344@N00/4268495543/in/pool-1234@N20";

    #[tokio::test]
    async fn test_shorten_success_trims_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/shorten"))
            .and(query_param("login", "user"))
            .and(query_param("apiKey", "R_key"))
            .and(query_param("longUrl", LONG))
            .and(query_param("format", "txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("http://bit.ly/abc123\n"))
            .expect(1)
            .mount(&server)
            .await;

        let client = BitlyClient::new(Client::new(), &server.uri(), "user", "R_key");
        assert_eq!(client.shorten(LONG).await.unwrap(), "http://bit.ly/abc123");
    }

    #[tokio::test]
    async fn test_shorten_non_200_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("RATE_LIMIT_EXCEEDED"))
            .mount(&server)
            .await;

        let client = BitlyClient::new(Client::new(), &server.uri(), "user", "R_key");
        let err = client.shorten(LONG).await.unwrap_err();
        assert!(matches!(err, BotError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_shorten_other_2xx_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(201).set_body_string("http://bit.ly/x"))
            .mount(&server)
            .await;

        let client = BitlyClient::new(Client::new(), &server.uri(), "user", "R_key");
        assert!(client.shorten(LONG).await.is_err());
    }

    #[tokio::test]
    async fn test_shorten_empty_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("  "))
            .mount(&server)
            .await;

        let client = BitlyClient::new(Client::new(), &server.uri(), "user", "R_key");
        assert!(client.shorten(LONG).await.is_err());
    }
}

//! Flickr group pool client.

use async_trait::async_trait;
use reqwest::Client;

use super::types::{Photo, PoolResponse};
use crate::config::BotConfig;
use crate::error::{BotError, Result};

const POOL_METHOD: &str = "flickr.groups.pools.getPhotos";

/// Result of asking the pool for its current photos.
///
/// A failed fetch is not an error for the caller: it simply means there is
/// nothing new this run. The reason is kept for logging and reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The pool listing, in provider order (newest first).
    Fetched(Vec<Photo>),
    /// The listing could not be fetched or parsed.
    Unavailable(String),
}

impl FetchOutcome {
    /// Photos in the listing; empty when unavailable.
    #[must_use]
    pub fn into_photos(self) -> Vec<Photo> {
        match self {
            Self::Fetched(photos) => photos,
            Self::Unavailable(_) => Vec::new(),
        }
    }
}

/// Source of pool photos and their thumbnails.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Fetch every photo currently in the pool. Never fails.
    async fn fetch_pool(&self) -> FetchOutcome;

    /// Download a thumbnail image.
    async fn fetch_thumbnail(&self, url: &str) -> Result<Vec<u8>>;
}

/// Flickr REST API client.
pub struct FlickrClient {
    client: Client,
    api_url: String,
    api_key: String,
    group_id: String,
}

impl FlickrClient {
    /// Create a client for the pool named in `config`.
    #[must_use]
    pub fn new(client: Client, config: &BotConfig) -> Self {
        Self {
            client,
            api_url: config.flickr_api_url.clone(),
            api_key: config.flickr_api_key.clone(),
            group_id: config.flickr_group_id.clone(),
        }
    }

    async fn request_pool(&self) -> std::result::Result<String, String> {
        let params = [
            ("method", POOL_METHOD),
            ("api_key", self.api_key.as_str()),
            ("group_id", self.group_id.as_str()),
            ("extras", "url_sq"),
            ("format", "json"),
            ("nojsoncallback", "1"),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }

        response
            .text()
            .await
            .map_err(|e| format!("failed to read body: {e}"))
    }
}

#[async_trait]
impl PhotoSource for FlickrClient {
    async fn fetch_pool(&self) -> FetchOutcome {
        tracing::debug!(group_id = %self.group_id, "Fetching pool photos");

        let outcome = match self.request_pool().await {
            Ok(body) => parse_pool_response(&body),
            Err(reason) => FetchOutcome::Unavailable(reason),
        };

        match &outcome {
            FetchOutcome::Fetched(photos) => {
                tracing::debug!(count = photos.len(), "Fetched pool listing");
            }
            FetchOutcome::Unavailable(reason) => {
                tracing::debug!(
                    group_id = %self.group_id,
                    reason = %reason,
                    "Pool listing unavailable"
                );
            }
        }
        outcome
    }

    async fn fetch_thumbnail(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "Downloading thumbnail");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Api {
                service: "Flickr",
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Parse a `getPhotos` JSON body into a fetch outcome.
pub fn parse_pool_response(body: &str) -> FetchOutcome {
    let response: PoolResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return FetchOutcome::Unavailable(format!("invalid JSON: {e}")),
    };

    if response.stat != "ok" {
        return FetchOutcome::Unavailable(format!(
            "Flickr error {}: {}",
            response.code.unwrap_or_default(),
            response.message.unwrap_or_default()
        ));
    }

    match response.photos {
        Some(page) => FetchOutcome::Fetched(page.photo),
        None => FetchOutcome::Unavailable("response has no photo list".to_string()),
    }
}

/// Keep photos added strictly after `watermark`, preserving provider order.
#[must_use]
pub fn filter_new(photos: Vec<Photo>, watermark: u64) -> Vec<Photo> {
    photos
        .into_iter()
        .filter(|p| p.date_added() > watermark)
        .collect()
}

/// Pool photos newer than `watermark`, in provider order.
///
/// An unavailable listing yields no photos.
pub async fn fetch_new_items(source: &dyn PhotoSource, watermark: u64) -> Vec<Photo> {
    filter_new(source.fetch_pool().await.into_photos(), watermark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn photo(id: &str, dateadded: &str) -> Photo {
        Photo {
            id: id.to_string(),
            owner: "99806344@N00".to_string(),
            ownername: "ocx2k4".to_string(),
            title: format!("Photo {id}"),
            dateadded: dateadded.to_string(),
            url_sq: format!("http://farm3.static.flickr.com/{id}_s.jpg"),
        }
    }

    fn config_for(server: &MockServer) -> BotConfig {
        let mut config = BotConfig::from_json(crate::config::tests::MINIMAL).unwrap();
        config.flickr_api_url = format!("{}/services/rest/", server.uri());
        config
    }

    #[test]
    fn test_filter_new_strictly_greater_keeps_order() {
        let photos = vec![
            photo("3", "300"),
            photo("2", "200"),
            photo("1", "100"),
            photo("4", "250"),
        ];

        let kept = filter_new(photos, 200);
        let ids: Vec<_> = kept.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["3", "4"]);
    }

    #[test]
    fn test_filter_new_zero_watermark_keeps_all() {
        let photos = vec![photo("1", "100"), photo("2", "200")];
        assert_eq!(filter_new(photos.clone(), 0), photos);
    }

    #[test]
    fn test_parse_ok_response() {
        let body = r#"{"photos":{"page":1,"pages":1,"perpage":100,"total":"2","photo":[
            {"id":"2","owner":"o","ownername":"n","title":"b","dateadded":"200","url_sq":"u2"},
            {"id":"1","owner":"o","ownername":"n","title":"a","dateadded":"100","url_sq":"u1"}
        ]},"stat":"ok"}"#;

        let FetchOutcome::Fetched(photos) = parse_pool_response(body) else {
            panic!("expected photos");
        };
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].id, "2");
    }

    #[test]
    fn test_parse_fail_stat() {
        let body = r#"{"stat":"fail","code":1,"message":"Group not found"}"#;
        match parse_pool_response(body) {
            FetchOutcome::Unavailable(reason) => assert!(reason.contains("Group not found")),
            FetchOutcome::Fetched(_) => panic!("expected unavailable"),
        }
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_pool_response("jsonFlickrApi({...})"),
            FetchOutcome::Unavailable(_)
        ));
        assert!(parse_pool_response("<html>").into_photos().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_pool_sends_expected_params() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/rest/"))
            .and(body_string_contains("method=flickr.groups.pools.getPhotos"))
            .and(body_string_contains("extras=url_sq"))
            .and(body_string_contains("format=json"))
            .and(body_string_contains("api_key=fkey"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"photos":{"photo":[{"id":"9","dateadded":"900"}]},"stat":"ok"}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = FlickrClient::new(Client::new(), &config_for(&server));
        let photos = fetch_new_items(&client, 100).await;
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].date_added(), 900);
    }

    #[tokio::test]
    async fn test_fetch_pool_server_error_degrades() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = FlickrClient::new(Client::new(), &config_for(&server));
        match client.fetch_pool().await {
            FetchOutcome::Unavailable(reason) => assert!(reason.contains("503")),
            FetchOutcome::Fetched(_) => panic!("expected unavailable"),
        }
    }

    #[tokio::test]
    async fn test_fetch_thumbnail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/thumb_s.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
            .mount(&server)
            .await;

        let client = FlickrClient::new(Client::new(), &config_for(&server));
        let bytes = client
            .fetch_thumbnail(&format!("{}/thumb_s.jpg", server.uri()))
            .await
            .unwrap();
        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);
    }

    #[tokio::test]
    async fn test_fetch_thumbnail_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = FlickrClient::new(Client::new(), &config_for(&server));
        let err = client
            .fetch_thumbnail(&format!("{}/missing.jpg", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::Api { status: 404, .. }));
    }
}

//! OAuth 1.0a request signing (HMAC-SHA1).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::BotConfig;

type HmacSha1 = Hmac<Sha1>;

/// Consumer and access-token credentials for a single account.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

impl OAuthCredentials {
    /// Credentials from the Twitter keys in `config`.
    #[must_use]
    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            consumer_key: config.twitter_consumer_key.clone(),
            consumer_secret: config.twitter_consumer_secret.clone(),
            token: config.twitter_access_token.clone(),
            token_secret: config.twitter_access_secret.clone(),
        }
    }

    /// Build an `Authorization` header value for a request.
    ///
    /// `params` are the query or form-urlencoded body parameters; multipart
    /// bodies are not part of the signature and must not be passed.
    #[must_use]
    pub fn authorization_header(&self, method: &str, url: &str, params: &[(&str, &str)]) -> String {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = Utc::now().timestamp().to_string();
        self.authorization_header_with(method, url, params, &nonce, &timestamp)
    }

    pub(crate) fn authorization_header_with(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> String {
        let mut oauth_params = vec![
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.token.as_str()),
            ("oauth_version", "1.0"),
        ];

        let signature = self.signature(method, url, params, &oauth_params);
        oauth_params.push(("oauth_signature", &signature));
        oauth_params.sort_unstable();

        let fields: Vec<String> = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect();
        format!("OAuth {}", fields.join(", "))
    }

    fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        oauth_params: &[(&str, &str)],
    ) -> String {
        let mut pairs: Vec<(String, String)> = params
            .iter()
            .chain(oauth_params)
            .map(|(k, v)| (encode(k), encode(v)))
            .collect();
        pairs.sort_unstable();

        let param_string = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let base = format!(
            "{}&{}&{}",
            method.to_ascii_uppercase(),
            encode(url),
            encode(&param_string)
        );
        let key = format!(
            "{}&{}",
            encode(&self.consumer_secret),
            encode(&self.token_secret)
        );

        let mut mac =
            HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
        mac.update(base.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}

/// RFC 3986 percent-encoding; only `A-Z a-z 0-9 - . _ ~` pass through.
fn encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

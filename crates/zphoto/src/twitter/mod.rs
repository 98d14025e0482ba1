//! Twitter publishing.
//!
//! Posts status messages and uploads the profile image, signing each request
//! with OAuth 1.0a.

mod client;
mod oauth;

pub use client::{profile_image_filename, DryRunPublisher, StatusPublisher, TwitterClient};
pub use oauth::OAuthCredentials;

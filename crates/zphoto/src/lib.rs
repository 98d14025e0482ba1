//! Flickr group pool to Twitter bridge.
//!
//! This crate provides:
//! - Incremental detection of new pool photos against a stored watermark
//! - Oldest-first publishing of `<short link> "<title>" by <owner>` statuses
//! - Base-58 `flic.kr` short codes with optional bit.ly shortening
//! - Profile image updates from the newest photo's thumbnail
//! - A day-counter announcement mode

pub mod announce;
pub mod bot;
pub mod config;
pub mod error;
pub mod flickr;
pub mod shortener;
pub mod twitter;
pub mod watermark;

// Re-export main types
pub use bot::{SyncBot, SyncReport};
pub use config::BotConfig;
pub use error::{BotError, ConfigError};
pub use flickr::{FetchOutcome, FlickrClient, Photo, PhotoSource};
pub use shortener::{LinkShortener, ShortLinkResolver};
pub use twitter::{DryRunPublisher, StatusPublisher, TwitterClient};
pub use watermark::{WatermarkRead, WatermarkStore};

//! Sync bot - orchestrates one fetch-filter-publish-persist cycle.

use std::sync::Arc;

use crate::error::Result;
use crate::flickr::{filter_new, FetchOutcome, Photo, PhotoSource};
use crate::shortener::ShortLinkResolver;
use crate::twitter::StatusPublisher;
use crate::watermark::{WatermarkRead, WatermarkStore};

/// Result of a single sync cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Photos in the pool listing.
    pub fetched: usize,
    /// Photos newer than the watermark.
    pub new_items: usize,
    /// Status messages posted.
    pub published: usize,
    /// Watermark at the start of the cycle.
    pub watermark_before: u64,
    /// Watermark at the end of the cycle.
    pub watermark_after: u64,
    /// Whether the profile image was replaced.
    pub profile_updated: bool,
    /// Why the pool listing was unavailable, if it was.
    pub degraded: Option<String>,
}

/// Posts new pool photos and advances the watermark.
pub struct SyncBot {
    source: Arc<dyn PhotoSource>,
    publisher: Arc<dyn StatusPublisher>,
    links: ShortLinkResolver,
    store: WatermarkStore,
    persist: bool,
}

impl SyncBot {
    /// Create a new bot.
    #[must_use]
    pub fn new(
        source: Arc<dyn PhotoSource>,
        publisher: Arc<dyn StatusPublisher>,
        links: ShortLinkResolver,
        store: WatermarkStore,
    ) -> Self {
        Self {
            source,
            publisher,
            links,
            store,
            persist: true,
        }
    }

    /// Leave the watermark file untouched at the end of the cycle.
    #[must_use]
    pub fn without_persistence(mut self) -> Self {
        self.persist = false;
        self
    }

    /// Status text for `photo`, with its short link resolved.
    pub async fn compose_message(&self, photo: &Photo) -> String {
        let short_url = self.links.resolve(photo).await;
        status_text(&short_url, photo)
    }

    /// Run a single sync cycle.
    ///
    /// Publishing errors abort the cycle before the watermark is written, so
    /// photos already posted in this cycle will be posted again next run.
    pub async fn run_cycle(&self) -> Result<SyncReport> {
        tracing::info!(publisher = self.publisher.name(), "Starting sync cycle");

        let read = self.store.read();
        match &read {
            WatermarkRead::Loaded(v) => tracing::debug!(watermark = v, "Loaded watermark"),
            WatermarkRead::Missing => {
                tracing::info!(
                    path = %self.store.path().display(),
                    "No watermark yet - starting from 0"
                );
            }
            WatermarkRead::Unreadable(reason) => {
                tracing::warn!(
                    path = %self.store.path().display(),
                    reason = %reason,
                    "Watermark unreadable - starting from 0"
                );
            }
        }
        let watermark = read.value();

        let mut report = SyncReport {
            watermark_before: watermark,
            watermark_after: watermark,
            ..SyncReport::default()
        };

        let listing = match self.source.fetch_pool().await {
            FetchOutcome::Fetched(photos) => photos,
            FetchOutcome::Unavailable(reason) => {
                tracing::warn!(reason = %reason, "Pool unavailable - nothing to publish");
                report.degraded = Some(reason);
                return Ok(report);
            }
        };
        report.fetched = listing.len();

        let mut batch = filter_new(listing, watermark);
        report.new_items = batch.len();

        if batch.is_empty() {
            tracing::info!(fetched = report.fetched, watermark, "No new photos to publish");
            return Ok(report);
        }

        // Provider order is newest first; replay oldest first.
        batch.reverse();

        for photo in &batch {
            let message = self.compose_message(photo).await;
            tracing::info!(
                id = %photo.id,
                owner = %photo.ownername,
                dateadded = photo.date_added(),
                "Publishing photo"
            );
            self.publisher.post_status(&message).await?;
            report.published += 1;
        }

        let Some(latest) = latest_photo(&batch) else {
            return Ok(report);
        };
        let new_watermark = latest.date_added();

        if self.persist {
            self.store.write(new_watermark)?;
            tracing::debug!(watermark = new_watermark, "Saved watermark");
        } else {
            tracing::info!(watermark = new_watermark, "Not persisting watermark");
        }
        report.watermark_after = new_watermark;

        report.profile_updated = self.update_profile_image(latest).await?;

        tracing::info!(
            fetched = report.fetched,
            new_items = report.new_items,
            published = report.published,
            watermark = report.watermark_after,
            profile_updated = report.profile_updated,
            "Sync cycle complete"
        );

        Ok(report)
    }

    async fn update_profile_image(&self, photo: &Photo) -> Result<bool> {
        if photo.url_sq.is_empty() {
            tracing::warn!(id = %photo.id, "Latest photo has no thumbnail URL");
            return Ok(false);
        }

        let image = self.source.fetch_thumbnail(&photo.url_sq).await?;
        if image.is_empty() {
            tracing::warn!(url = %photo.url_sq, "Thumbnail download was empty");
            return Ok(false);
        }

        self.publisher.update_profile_image(image).await?;
        tracing::info!(id = %photo.id, "Updated profile image");
        Ok(true)
    }
}

/// `<short_url> "<title>" by <ownername>`
#[must_use]
pub fn status_text(short_url: &str, photo: &Photo) -> String {
    format!("{short_url} \"{}\" by {}", photo.title, photo.ownername)
}

/// Photo with the greatest `dateadded`; the earliest one wins a tie.
#[must_use]
pub fn latest_photo(photos: &[Photo]) -> Option<&Photo> {
    photos.iter().fold(None, |best: Option<&Photo>, photo| match best {
        Some(b) if photo.date_added() <= b.date_added() => Some(b),
        _ => Some(photo),
    })
}

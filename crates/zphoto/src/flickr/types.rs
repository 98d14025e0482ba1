//! Flickr data types.

use serde::{Deserialize, Serialize};

/// A photo from the group pool, as returned by `flickr.groups.pools.getPhotos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Numeric photo ID (as a string).
    pub id: String,
    /// Owner NSID, e.g. `99806344@N00`.
    #[serde(default)]
    pub owner: String,
    /// Owner display name.
    #[serde(default)]
    pub ownername: String,
    /// Photo title.
    #[serde(default)]
    pub title: String,
    /// Unix timestamp the photo was added to the pool (as a string).
    #[serde(default)]
    pub dateadded: String,
    /// Square thumbnail URL, present because we request `extras=url_sq`.
    #[serde(default)]
    pub url_sq: String,
}

impl Photo {
    /// When the photo was added to the pool, as unix seconds.
    #[must_use]
    pub fn date_added(&self) -> u64 {
        leading_u64(&self.dateadded)
    }

    /// Photo ID as a number, used for `flic.kr` short codes.
    #[must_use]
    pub fn numeric_id(&self) -> u64 {
        leading_u64(&self.id)
    }
}

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct PoolResponse {
    pub stat: String,
    #[serde(default)]
    pub photos: Option<PoolPage>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One page of pool photos.
#[derive(Debug, Deserialize)]
pub(crate) struct PoolPage {
    #[serde(default)]
    pub photo: Vec<Photo>,
}

/// Parse the leading decimal digits of `s`, ignoring leading whitespace.
///
/// Anything without a leading digit, or too large for `u64`, reads as 0.
pub(crate) fn leading_u64(s: &str) -> u64 {
    let trimmed = s.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_u64() {
        assert_eq!(leading_u64("1263309596"), 1_263_309_596);
        assert_eq!(leading_u64("  42\n"), 42);
        assert_eq!(leading_u64("123abc"), 123);
        assert_eq!(leading_u64("abc"), 0);
        assert_eq!(leading_u64(""), 0);
        assert_eq!(leading_u64("-5"), 0);
    }

    #[test]
    fn test_photo_deserialize_sample() {
        let json = r#"{"width_sq":75, "ispublic":1, "height_sq":75,
            "title":"Sunrise at Zappos Day 1 of 365", "farm":3,
            "url_sq":"http://farm3.static.flickr.com/2705/4268495543_bd80cddf16_s.jpg",
            "isfamily":0, "server":"2705", "id":"4268495543", "dateadded":"1263309596",
            "secret":"bd80cddf16", "ownername":"ocx2k4", "isfriend":0, "owner":"99806344@N00"}"#;
        let photo: Photo = serde_json::from_str(json).unwrap();

        assert_eq!(photo.numeric_id(), 4_268_495_543);
        assert_eq!(photo.date_added(), 1_263_309_596);
        assert_eq!(photo.ownername, "ocx2k4");
        assert_eq!(photo.owner, "99806344@N00");
    }
}

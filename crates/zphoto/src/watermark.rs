//! Watermark persistence.
//!
//! The watermark is the `dateadded` of the newest photo already posted,
//! stored as a single plain-text integer.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::flickr::leading_u64;

/// Default watermark file, relative to the working directory.
pub const DEFAULT_WATERMARK_FILE: &str = "zphoto_last_date.txt";

/// Outcome of reading the watermark file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatermarkRead {
    /// The file held a timestamp.
    Loaded(u64),
    /// No file yet (first run).
    Missing,
    /// The file exists but could not be read or parsed.
    Unreadable(String),
}

impl WatermarkRead {
    /// The effective watermark; 0 unless a value was loaded.
    #[must_use]
    pub fn value(&self) -> u64 {
        match self {
            Self::Loaded(v) => *v,
            Self::Missing | Self::Unreadable(_) => 0,
        }
    }
}

/// Flat-file watermark store.
#[derive(Debug, Clone)]
pub struct WatermarkStore {
    path: PathBuf,
}

impl WatermarkStore {
    /// Create a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored watermark. Never fails; see [`WatermarkRead::value`].
    pub fn read(&self) -> WatermarkRead {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return WatermarkRead::Missing,
            Err(e) => return WatermarkRead::Unreadable(e.to_string()),
        };

        if content.trim_start().starts_with(|c: char| c.is_ascii_digit()) {
            WatermarkRead::Loaded(leading_u64(&content))
        } else {
            WatermarkRead::Unreadable(format!("not an integer: {:?}", content.trim()))
        }
    }

    /// Overwrite the stored watermark.
    pub fn write(&self, value: u64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, value.to_string())?;
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display metadata attached to a media item
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MediaMetadata {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// Size of the full-resolution resource in bytes
    #[serde(default)]
    pub byte_size: Option<u64>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// A single image supplied by the collaborator.
///
/// The position of an item is its index in the sequence handed to the viewer.
/// `source` and `thumbnail` are opaque references passed to the loader untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: String,
    pub source: String,
    pub thumbnail: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub metadata: MediaMetadata,
}

impl MediaItem {
    pub fn new(id: impl Into<String>, source: impl Into<String>, thumbnail: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            thumbnail: thumbnail.into(),
            name: String::new(),
            metadata: MediaMetadata::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_metadata(mut self, metadata: MediaMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Name to show in overlays, falls back to the id
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.metadata.width?, self.metadata.height?))
    }
}

/// Format file size in human-readable format
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

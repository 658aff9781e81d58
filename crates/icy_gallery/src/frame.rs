//! Read-only snapshot of what a renderer should draw.

use chrono::{DateTime, Utc};

use crate::{MediaItem, format_size, preload::LoadState, viewer::Viewer};

/// What the main image area shows for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideState {
    /// Full-resolution resource resolved
    Ready { width: u32, height: u32 },
    /// Not loaded yet, show the thumbnail or a spinner
    Placeholder,
    /// Loading failed, show a broken-image tile
    Broken,
}

impl From<Option<LoadState>> for SlideState {
    fn from(state: Option<LoadState>) -> Self {
        match state {
            Some(LoadState::Loaded(image)) => SlideState::Ready {
                width: image.width,
                height: image.height,
            },
            Some(LoadState::Failed) => SlideState::Broken,
            Some(LoadState::Loading) | None => SlideState::Placeholder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideView {
    pub index: usize,
    pub source: String,
    pub state: SlideState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailEntry {
    pub index: usize,
    pub thumbnail: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataOverlay {
    pub title: String,
    pub author: Option<String>,
    /// "1920 × 1080"
    pub dimensions: Option<String>,
    pub size: Option<String>,
    pub uploaded: Option<String>,
}

impl MetadataOverlay {
    fn new(item: &MediaItem, state: SlideState) -> Self {
        let dimensions = item.dimensions().or(match state {
            SlideState::Ready { width, height } => Some((width, height)),
            _ => None,
        });
        Self {
            title: item.display_name().to_string(),
            author: item.metadata.author.clone(),
            dimensions: dimensions.map(|(w, h)| format!("{w} × {h}")),
            size: item.metadata.byte_size.map(format_size),
            uploaded: item.metadata.uploaded_at.map(format_date),
        }
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerFrame {
    pub index: usize,
    pub count: usize,
    /// 1-based position, "3 / 12"
    pub counter: String,
    /// `None` for an empty collection
    pub current: Option<SlideView>,
    /// Every item the cache knows about, in index order
    pub slides: Vec<SlideView>,
    pub thumbnails: Vec<ThumbnailEntry>,
    pub controls_visible: bool,
    pub is_playing: bool,
    /// Slide progress in percent
    pub progress: f32,
    pub speed_ms: u64,
    pub is_fullscreen: bool,
    pub metadata: Option<MetadataOverlay>,
}

impl ViewerFrame {
    /// Snapshot of an open viewer
    pub fn build(viewer: &Viewer) -> Option<Self> {
        let session = viewer.session();
        if !session.is_open() {
            return None;
        }
        let items = viewer.items();
        let preload = viewer.preload();
        let index = session.current_index();

        let slide = |i: usize| {
            items.get(i).map(|item| SlideView {
                index: i,
                source: item.source.clone(),
                state: preload.state(i).into(),
            })
        };

        let current = slide(index);
        let slides = (0..items.len()).filter(|i| preload.contains(*i)).filter_map(slide).collect();
        let thumbnails = viewer
            .thumbnail_window()
            .indices()
            .filter_map(|i| {
                items.get(i).map(|item| ThumbnailEntry {
                    index: i,
                    thumbnail: item.thumbnail.clone(),
                    is_active: i == index,
                })
            })
            .collect();

        let metadata = if session.metadata_overlay_visible() {
            current
                .as_ref()
                .and_then(|view| items.get(view.index).map(|item| MetadataOverlay::new(item, view.state)))
        } else {
            None
        };

        let count = session.item_count();
        let counter = if count == 0 { "0 / 0".to_string() } else { format!("{} / {}", index + 1, count) };

        Some(Self {
            index,
            count,
            counter,
            current,
            slides,
            thumbnails,
            controls_visible: session.controls_visible(),
            is_playing: session.is_playing(),
            progress: viewer.progress(),
            speed_ms: session.slideshow_speed_ms(),
            is_fullscreen: session.is_fullscreen(),
            metadata,
        })
    }
}

use crate::slideshow::DEFAULT_SPEED_MS;

/// Mutable state of one open viewing session.
///
/// Front ends read it through the accessors; only the viewer and the
/// slideshow controller write to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSession {
    pub(crate) current_index: usize,
    pub(crate) item_count: usize,
    pub(crate) is_open: bool,
    pub(crate) is_playing: bool,
    pub(crate) slideshow_speed_ms: u64,
    pub(crate) controls_visible: bool,
    pub(crate) metadata_overlay_visible: bool,
    pub(crate) is_fullscreen: bool,
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self {
            current_index: 0,
            item_count: 0,
            is_open: false,
            is_playing: false,
            slideshow_speed_ms: DEFAULT_SPEED_MS,
            controls_visible: true,
            metadata_overlay_visible: false,
            is_fullscreen: false,
        }
    }
}

impl ViewerSession {
    /// Session for `item_count` items, the initial index clamped into range
    pub(crate) fn open(item_count: usize, initial_index: usize, speed_ms: u64, show_metadata: bool) -> Self {
        Self {
            current_index: initial_index.min(item_count.saturating_sub(1)),
            item_count,
            is_open: true,
            slideshow_speed_ms: speed_ms,
            metadata_overlay_visible: show_metadata,
            ..Default::default()
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn slideshow_speed_ms(&self) -> u64 {
        self.slideshow_speed_ms
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn metadata_overlay_visible(&self) -> bool {
        self.metadata_overlay_visible
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Navigation and slideshow need at least two items
    pub fn can_navigate(&self) -> bool {
        self.is_open && self.item_count > 1
    }
}

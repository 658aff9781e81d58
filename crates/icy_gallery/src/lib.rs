//! Headless full-screen media viewer.
//!
//! A [`Viewer`] browses an ordered list of [`MediaItem`]s: navigation with
//! wraparound, prefetching around the current item, a windowed thumbnail
//! strip, swipe gestures, key bindings, auto-hiding controls and a timed
//! slideshow. Front ends feed it input and time and draw [`ViewerFrame`]s.

pub mod carousel;
pub mod commands;
pub mod controls;
pub mod error;
pub mod frame;
pub mod gesture;
pub mod media;
pub mod options;
pub mod preload;
pub mod session;
pub mod slideshow;
pub mod thumbnail_window;
pub mod timer;
pub mod viewer;

pub use carousel::{InstantCarousel, SettlingCarousel, SnapCarousel};
pub use commands::{Hotkey, KeyCode, Modifiers, ViewerCommand};
pub use error::{GalleryError, GalleryResult, LoadError};
pub use frame::{MetadataOverlay, SlideState, SlideView, ThumbnailEntry, ViewerFrame};
pub use gesture::{GestureOutcome, MoveResponse, Point, SwipeDirection};
pub use media::{MediaItem, MediaMetadata, format_size};
pub use options::Options;
pub use preload::{FileLoader, LoadState, PreloadCache, RecordingLoader, ResourceLoader};
pub use session::ViewerSession;
pub use slideshow::PlayState;
pub use thumbnail_window::{ThumbnailWindow, compute_window};
pub use viewer::{CloseCallback, CloseReason, OpenRequest, Viewer, ViewerEvent, carousel_for};

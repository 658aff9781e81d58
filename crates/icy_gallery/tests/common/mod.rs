#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use icy_gallery::{InstantCarousel, MediaItem, OpenRequest, Options, RecordingLoader, SnapCarousel, Viewer};

pub fn items(count: usize) -> Arc<[MediaItem]> {
    (0..count)
        .map(|i| MediaItem::new(format!("item{i}"), format!("full/{i}.jpg"), format!("thumb/{i}.jpg")))
        .collect::<Vec<_>>()
        .into()
}

pub fn viewer_with(options: &Options, carousel: Box<dyn SnapCarousel>) -> (Viewer, RecordingLoader) {
    let (loader, results) = RecordingLoader::new();
    let viewer = Viewer::new(options, carousel, Box::new(loader.clone()), results).unwrap();
    (viewer, loader)
}

pub fn viewer() -> (Viewer, RecordingLoader) {
    viewer_with(&Options::default(), Box::new(InstantCarousel::default()))
}

/// Viewer opened on `count` items at `index`
pub fn open_viewer(count: usize, index: usize) -> (Viewer, RecordingLoader) {
    let (mut viewer, loader) = viewer();
    viewer.open(OpenRequest::new(items(count)).at(index));
    viewer.take_events();
    (viewer, loader)
}

pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

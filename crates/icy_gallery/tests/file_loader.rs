use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use icy_gallery::{
    LoadError, MediaItem, OpenRequest, Options, Viewer,
    preload::{FileLoader, LoadRequest, LoadResult, LoadedImage, ResourceLoader},
};
use pretty_assertions::assert_eq;
use tokio::sync::mpsc::UnboundedReceiver;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("icy_gallery_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> String {
    let path = dir.join(name);
    image::RgbImage::new(width, height).save(&path).unwrap();
    path.to_string_lossy().to_string()
}

fn wait_for(rx: &mut UnboundedReceiver<LoadResult>) -> LoadResult {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Ok(result) = rx.try_recv() {
            return result;
        }
        assert!(Instant::now() < deadline, "no load result");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_loads_local_image() {
    let dir = temp_dir("local");
    let source = write_png(&dir, "a.png", 7, 5);

    let (loader, mut rx) = FileLoader::spawn().unwrap();
    loader.load(LoadRequest {
        index: 3,
        source: format!("file://{source}"),
        generation: 1,
    });
    let result = wait_for(&mut rx);
    assert_eq!(result.index, 3);
    assert_eq!(result.generation, 1);
    assert_eq!(result.outcome, Ok(LoadedImage { width: 7, height: 5 }));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_missing_file_fails() {
    let dir = temp_dir("missing");
    let (loader, mut rx) = FileLoader::spawn().unwrap();
    loader.load(LoadRequest {
        index: 0,
        source: dir.join("nope.png").to_string_lossy().to_string(),
        generation: 1,
    });
    assert!(matches!(wait_for(&mut rx).outcome, Err(LoadError::Io { .. })));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_garbage_fails_to_decode() {
    let dir = temp_dir("garbage");
    let path = dir.join("broken.png");
    fs::write(&path, b"definitely not a png").unwrap();

    let (loader, mut rx) = FileLoader::spawn().unwrap();
    loader.load(LoadRequest {
        index: 0,
        source: path.to_string_lossy().to_string(),
        generation: 1,
    });
    assert!(matches!(wait_for(&mut rx).outcome, Err(LoadError::Decode { .. })));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_viewer_with_file_loader() {
    let dir = temp_dir("viewer");
    let items: Vec<MediaItem> = (0..4)
        .map(|i| {
            let source = write_png(&dir, &format!("{i}.png"), 10 + i, 10);
            MediaItem::new(format!("{i}"), source.clone(), source)
        })
        .collect();

    let mut viewer = Viewer::with_file_loader(&Options::default()).unwrap();
    viewer.open(OpenRequest::new(items).at(1));

    let deadline = Instant::now() + Duration::from_secs(10);
    while viewer.preload().in_flight() > 0 {
        assert!(Instant::now() < deadline, "loads did not finish");
        std::thread::sleep(Duration::from_millis(5));
        viewer.poll_loads();
    }
    for i in 0..4 {
        assert!(viewer.preload().is_loaded(i), "index {i}");
    }
    let frame = viewer.frame().unwrap();
    assert_eq!(frame.current.unwrap().state, icy_gallery::SlideState::Ready { width: 11, height: 10 });

    let _ = fs::remove_dir_all(dir);
}

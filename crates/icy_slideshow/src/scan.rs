use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use icy_gallery::{MediaItem, MediaMetadata};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

pub fn is_image(path: &Path) -> bool {
    image::ImageFormat::from_path(path).is_ok()
}

/// Images below `path`, sorted by name, and the index to start at.
///
/// A file argument scans its folder and starts at the file itself.
pub fn collect_items(path: &Path, recursive: bool) -> anyhow::Result<(Vec<MediaItem>, usize)> {
    let (dir, selected) = if path.is_file() {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        (dir, Some(path.to_path_buf()))
    } else {
        (path.to_path_buf(), None)
    };
    if !dir.is_dir() {
        anyhow::bail!("'{}' is not a folder", dir.display());
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut items = Vec::new();
    let mut start = 0;
    for entry in WalkDir::new(&dir)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }
        if entry.depth() == 1 && selected.as_deref().is_some_and(|s| s.file_name() == Some(entry.file_name())) {
            start = items.len();
        }
        items.push(media_item(&dir, &entry));
    }
    log::info!("Found {} images in {}", items.len(), dir.display());
    Ok((items, start))
}

fn media_item(root: &Path, entry: &DirEntry) -> MediaItem {
    let path = entry.path();
    let source = path.to_string_lossy().to_string();
    let id = path.strip_prefix(root).unwrap_or(path).to_string_lossy().to_string();
    let name = entry.file_name().to_string_lossy().to_string();

    let mut metadata = MediaMetadata::default();
    if let Ok((width, height)) = image::image_dimensions(path) {
        metadata.width = Some(width);
        metadata.height = Some(height);
    }
    if let Ok(fs_meta) = entry.metadata() {
        metadata.byte_size = Some(fs_meta.len());
        metadata.uploaded_at = fs_meta.modified().ok().map(DateTime::<Utc>::from);
    }

    // no separate thumbnails on disk, the strip shows the image itself
    MediaItem::new(id, source.clone(), source).with_name(name).with_metadata(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("icy_slideshow_{}_{}", name, std::process::id()));
        fs::create_dir_all(dir.join("sub")).unwrap();
        dir
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("a/b.PNG")));
        assert!(is_image(Path::new("photo.jpeg")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("README")));
    }

    #[test]
    fn test_collect_items() {
        let dir = temp_dir("scan");
        image::RgbImage::new(3, 2).save(dir.join("b.png")).unwrap();
        image::RgbImage::new(5, 4).save(dir.join("a.png")).unwrap();
        image::RgbImage::new(1, 1).save(dir.join("sub").join("c.png")).unwrap();
        fs::write(dir.join("notes.txt"), "x").unwrap();
        fs::write(dir.join(".hidden.png"), "x").unwrap();

        let (items, start) = collect_items(&dir, false).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
        assert_eq!(start, 0);
        assert_eq!(items[0].dimensions(), Some((5, 4)));
        assert!(items[0].metadata.byte_size.is_some());

        let (items, _) = collect_items(&dir, true).unwrap();
        assert_eq!(items.len(), 3);

        let (_, start) = collect_items(&dir.join("b.png"), false).unwrap();
        assert_eq!(start, 1);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_folder() {
        assert!(collect_items(Path::new("/definitely/not/here"), false).is_err());
    }
}

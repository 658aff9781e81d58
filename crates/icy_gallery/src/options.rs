use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    commands::{CommandSet, ViewerCommand, parse_hotkeys},
    error::{GalleryError, GalleryResult},
    gesture::{DEFAULT_LOCK_THRESHOLD, DEFAULT_SWIPE_THRESHOLD},
    preload::DEFAULT_PRELOAD_RADIUS,
    slideshow::{DEFAULT_SPEED_MS, DEFAULT_TICK_INTERVAL, SlideshowController},
    thumbnail_window::DEFAULT_WINDOW_SIZE,
};

const OPTIONS_FILE: &str = "options.toml";

/// Tunables of the viewer, stored as `options.toml` in the config dir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Items prefetched on each side of the current one
    pub preload_radius: usize,
    /// Maximum number of thumbnails in the strip
    pub thumbnail_window: usize,
    pub controls_hide_ms: u64,
    pub slideshow_tick_ms: u64,
    /// Time per slide when the opener does not ask for one
    pub default_speed_ms: u64,
    pub swipe_lock_px: f32,
    pub swipe_min_px: f32,
    /// Carousel animation time, 0 settles immediately
    pub carousel_settle_ms: u64,
    /// Command id -> hotkeys, replacing the built-in bindings
    pub keymap: BTreeMap<String, Vec<String>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            preload_radius: DEFAULT_PRELOAD_RADIUS,
            thumbnail_window: DEFAULT_WINDOW_SIZE,
            controls_hide_ms: 3000,
            slideshow_tick_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            default_speed_ms: DEFAULT_SPEED_MS,
            swipe_lock_px: DEFAULT_LOCK_THRESHOLD,
            swipe_min_px: DEFAULT_SWIPE_THRESHOLD,
            carousel_settle_ms: 0,
            keymap: BTreeMap::new(),
        }
    }
}

impl Options {
    pub fn config_file() -> GalleryResult<PathBuf> {
        let proj_dirs = directories::ProjectDirs::from("com", "GitHub", "icy_gallery").ok_or(GalleryError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().join(OPTIONS_FILE))
    }

    /// Options from the config dir; defaults if there are none or they can't be read.
    pub fn load_options() -> Self {
        let file = match Self::config_file() {
            Ok(file) => file,
            Err(err) => {
                log::error!("[Options] {err}");
                return Self::default();
            }
        };
        if !file.exists() {
            return Self::default();
        }
        match Self::load_from(&file) {
            Ok(options) => options,
            Err(err) => {
                log::error!("[Options] {err}, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> GalleryResult<Self> {
        let content = fs::read_to_string(path).map_err(|err| GalleryError::ReadOptions {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn store_options(&self) -> GalleryResult<()> {
        self.store_to(&Self::config_file()?)
    }

    /// Writes `<name>.new` first and renames it over `path`.
    pub fn store_to(&self, path: &Path) -> GalleryResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut write_name = path.to_path_buf();
        write_name.set_extension("new");

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&write_name, toml_string)?;
        fs::rename(&write_name, path)?;
        Ok(())
    }

    pub fn controls_hide_delay(&self) -> Duration {
        Duration::from_millis(self.controls_hide_ms)
    }

    pub fn slideshow_tick(&self) -> Duration {
        Duration::from_millis(self.slideshow_tick_ms.max(1))
    }

    pub fn default_speed_ms(&self) -> u64 {
        SlideshowController::clamp_speed(self.default_speed_ms)
    }

    pub fn carousel_settle(&self) -> Duration {
        Duration::from_millis(self.carousel_settle_ms)
    }

    /// Replace the bindings of every command named in `keymap`.
    pub fn apply_keymap(&self, commands: &mut CommandSet) -> GalleryResult<()> {
        for (id, bindings) in &self.keymap {
            let command: ViewerCommand = id.parse()?;
            let hotkeys = parse_hotkeys(id, bindings)?;
            if !commands.override_hotkeys(command.id(), hotkeys) {
                return Err(GalleryError::UnknownCommand(id.clone()));
            }
        }
        Ok(())
    }
}

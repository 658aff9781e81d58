//! Prefetching of full-resolution resources around the current item.
//!
//! The cache issues at most one load per index and session. Results come back
//! out of order through the loader's channel and are applied by
//! [`PreloadCache::poll_results`]. Every activation starts a new generation;
//! results tagged with an older one are dropped.

mod loader;

pub use loader::{FileLoader, LoadRequest, LoadResult, LoadedImage, RecordingLoader, ResourceLoader};

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::mpsc;

use crate::MediaItem;

/// Items eagerly fetched on each side of the current one
pub const DEFAULT_PRELOAD_RADIUS: usize = 2;

/// Load state of one index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// A load is in flight
    Loading,
    Loaded(LoadedImage),
    /// Resolving failed, never retried within the session
    Failed,
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

pub struct PreloadCache {
    loader: Box<dyn ResourceLoader>,
    results: mpsc::UnboundedReceiver<LoadResult>,
    items: Arc<[MediaItem]>,
    entries: HashMap<usize, LoadState>,
    radius: usize,
    generation: u64,
    active: bool,
}

impl PreloadCache {
    pub fn new(loader: Box<dyn ResourceLoader>, results: mpsc::UnboundedReceiver<LoadResult>) -> Self {
        Self {
            loader,
            results,
            items: Arc::from(Vec::new()),
            entries: HashMap::new(),
            radius: DEFAULT_PRELOAD_RADIUS,
            generation: 0,
            active: false,
        }
    }

    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Start a new session over `items`
    pub fn activate(&mut self, items: Arc<[MediaItem]>) {
        self.generation += 1;
        self.entries.clear();
        self.items = items;
        self.active = true;
        debug!("[PreloadCache] Activated for {} items (gen={})", self.items.len(), self.generation);
    }

    /// End the session. In-flight loads may still finish but are ignored.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.loader.cancel_all();
        self.generation += 1;
        self.entries.clear();
        self.items = Arc::from(Vec::new());
        debug!("[PreloadCache] Deactivated (gen={})", self.generation);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Issue loads for `index` and its neighbours within the preload radius.
    ///
    /// Indices that are loaded, failed or already in flight are skipped, as are
    /// indices outside the collection. Returns the number of loads issued.
    pub fn ensure_window(&mut self, index: usize) -> usize {
        if !self.active {
            return 0;
        }

        let count = self.items.len();
        let first = index.saturating_sub(self.radius);
        let last = index.saturating_add(self.radius).min(count.saturating_sub(1));
        if count == 0 || first > last {
            return 0;
        }

        let mut issued = 0;
        for i in first..=last {
            if self.entries.contains_key(&i) {
                continue;
            }
            self.entries.insert(i, LoadState::Loading);
            self.loader.load(LoadRequest {
                index: i,
                source: self.items[i].source.clone(),
                generation: self.generation,
            });
            issued += 1;
        }
        if issued > 0 {
            debug!("[PreloadCache] Issued {} loads around #{}", issued, index);
        }
        issued
    }

    /// Apply completed loads. Returns the indices whose state changed.
    pub fn poll_results(&mut self) -> Vec<usize> {
        let mut changed = Vec::new();
        while let Ok(result) = self.results.try_recv() {
            if !self.active || result.generation != self.generation {
                debug!("[PreloadCache] Dropping stale result for #{} (gen={}, current={})", result.index, result.generation, self.generation);
                continue;
            }
            let Some(entry) = self.entries.get_mut(&result.index) else {
                continue;
            };
            if !entry.is_loading() {
                continue;
            }
            *entry = match result.outcome {
                Ok(image) => LoadState::Loaded(image),
                Err(err) => {
                    warn!("[PreloadCache] Load failed for #{}: {}", result.index, err);
                    LoadState::Failed
                }
            };
            changed.push(result.index);
        }
        changed
    }

    pub fn state(&self, index: usize) -> Option<LoadState> {
        self.entries.get(&index).copied()
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.state(index).is_some_and(|s| s.is_loaded())
    }

    pub fn is_failed(&self, index: usize) -> bool {
        self.state(index).is_some_and(|s| s.is_failed())
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn in_flight(&self) -> usize {
        self.entries.values().filter(|s| s.is_loading()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

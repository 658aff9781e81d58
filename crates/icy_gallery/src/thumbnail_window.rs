//! Virtualized thumbnail strip range.
//!
//! Only a contiguous slice of the collection is rendered in the strip. The
//! window is centered on the current item and slides along the collection,
//! keeping its full size whenever the collection is large enough.

use std::ops::Range;

/// Number of thumbnails rendered in the strip
pub const DEFAULT_WINDOW_SIZE: usize = 20;

/// Half-open range `[start, end)` into the item sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThumbnailWindow {
    pub start: usize,
    pub end: usize,
}

impl ThumbnailWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Compute the strip range around `current_index`.
///
/// Total and stateless: the same inputs always give the same window. An index
/// past the end is treated as the last item.
pub fn compute_window(current_index: usize, item_count: usize, window_size: usize) -> ThumbnailWindow {
    if item_count == 0 {
        return ThumbnailWindow::default();
    }
    if item_count <= window_size || window_size == 0 {
        return ThumbnailWindow { start: 0, end: item_count };
    }

    let current = current_index.min(item_count - 1);
    let mut start = current.saturating_sub(window_size / 2);
    let end = item_count.min(start + window_size);
    if end == item_count {
        start = end.saturating_sub(window_size);
    }
    ThumbnailWindow { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_collection_is_full_range() {
        for count in 0..=DEFAULT_WINDOW_SIZE {
            for current in 0..count.max(1) {
                let window = compute_window(current, count, DEFAULT_WINDOW_SIZE);
                assert_eq!(window, ThumbnailWindow { start: 0, end: count });
            }
        }
    }

    #[test]
    fn test_large_collection_always_has_full_window() {
        for count in DEFAULT_WINDOW_SIZE..=64 {
            for current in 0..count {
                let window = compute_window(current, count, DEFAULT_WINDOW_SIZE);
                assert_eq!(window.len(), DEFAULT_WINDOW_SIZE, "count={count} current={current}");
                assert!(window.contains(current), "count={count} current={current} window={window:?}");
                assert!(window.end <= count);
            }
        }
    }

    #[test]
    fn test_window_is_centered() {
        let window = compute_window(50, 100, 20);
        assert_eq!(window, ThumbnailWindow { start: 40, end: 60 });
    }

    #[test]
    fn test_window_clamps_at_edges() {
        assert_eq!(compute_window(3, 100, 20), ThumbnailWindow { start: 0, end: 20 });
        assert_eq!(compute_window(99, 100, 20), ThumbnailWindow { start: 80, end: 100 });
        assert_eq!(compute_window(95, 100, 20), ThumbnailWindow { start: 80, end: 100 });
    }

    #[test]
    fn test_out_of_range_index_is_clamped() {
        assert_eq!(compute_window(500, 100, 20), ThumbnailWindow { start: 80, end: 100 });
    }

    #[test]
    fn test_idempotent() {
        let a = compute_window(37, 80, 20);
        let b = compute_window(37, 80, 20);
        assert_eq!(a, b);
    }
}

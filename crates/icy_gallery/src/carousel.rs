//! The scroll-snap primitive seam.
//!
//! The viewer never moves the shown item itself. It asks a carousel to scroll
//! to an index and reacts once the carousel reports the settled selection.

use std::time::Duration;

pub trait SnapCarousel: Send {
    /// Animate towards `index`
    fn scroll_to(&mut self, index: usize);

    /// Next settled selection change, if any
    fn poll_selected(&mut self) -> Option<usize>;

    /// Index the carousel is heading to but has not reported yet
    fn target(&self) -> Option<usize> {
        None
    }

    /// Let time pass for carousels that animate
    fn advance(&mut self, _delta: Duration) {}

    /// Time until the running animation settles
    fn time_to_settle(&self) -> Option<Duration> {
        None
    }

    /// Drop any animation in progress
    fn reset(&mut self) {}
}

/// Index-driven re-render: every scroll settles at once.
#[derive(Debug, Default)]
pub struct InstantCarousel {
    selected: Option<usize>,
}

impl SnapCarousel for InstantCarousel {
    fn scroll_to(&mut self, index: usize) {
        self.selected = Some(index);
    }

    fn poll_selected(&mut self) -> Option<usize> {
        self.selected.take()
    }

    fn target(&self) -> Option<usize> {
        self.selected
    }

    fn reset(&mut self) {
        self.selected = None;
    }
}

/// Carousel that settles a fixed time after the last scroll command.
///
/// A new target while animating retargets the running animation, so only
/// the final index is reported.
#[derive(Debug)]
pub struct SettlingCarousel {
    settle_time: Duration,
    target: Option<usize>,
    remaining: Duration,
    settled: Option<usize>,
}

impl SettlingCarousel {
    pub fn new(settle_time: Duration) -> Self {
        Self {
            settle_time,
            target: None,
            remaining: Duration::ZERO,
            settled: None,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }
}

impl SnapCarousel for SettlingCarousel {
    fn scroll_to(&mut self, index: usize) {
        if self.settle_time.is_zero() {
            self.settled = Some(index);
            return;
        }
        self.target = Some(index);
        self.remaining = self.settle_time;
    }

    fn poll_selected(&mut self) -> Option<usize> {
        self.settled.take()
    }

    fn target(&self) -> Option<usize> {
        self.target.or(self.settled)
    }

    fn advance(&mut self, delta: Duration) {
        if self.target.is_none() {
            return;
        }
        self.remaining = self.remaining.saturating_sub(delta);
        if self.remaining.is_zero() {
            self.settled = self.target.take();
        }
    }

    fn time_to_settle(&self) -> Option<Duration> {
        self.target.map(|_| self.remaining)
    }

    fn reset(&mut self) {
        self.target = None;
        self.settled = None;
    }
}

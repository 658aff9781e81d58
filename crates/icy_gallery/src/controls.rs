//! Auto-hiding overlay chrome.
//!
//! Every bit of user activity shows the controls and restarts the hide
//! countdown (debounce). The timer only produces visibility changes; the viewer
//! applies them to the session.

use std::time::Duration;

use crate::timer::ScheduledTask;

/// Idle time after which the controls disappear
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

#[derive(Debug, Clone)]
pub struct ControlsTimer {
    countdown: ScheduledTask,
}

impl Default for ControlsTimer {
    fn default() -> Self {
        Self::new(DEFAULT_HIDE_DELAY)
    }
}

impl ControlsTimer {
    pub fn new(hide_delay: Duration) -> Self {
        Self {
            countdown: ScheduledTask::once(hide_delay),
        }
    }

    /// Pointer movement, key press or touch
    pub fn notify_activity(&mut self) -> Visibility {
        self.countdown.start();
        Visibility::Shown
    }

    /// Pointer left the viewer surface, hide without waiting
    pub fn pointer_left(&mut self) -> Visibility {
        self.countdown.cancel();
        Visibility::Hidden
    }

    pub fn cancel(&mut self) {
        self.countdown.cancel();
    }

    pub fn is_counting(&self) -> bool {
        self.countdown.is_active()
    }

    pub fn task(&self) -> &ScheduledTask {
        &self.countdown
    }

    /// Advance by at most the remaining countdown. Returns `Hidden` on expiry.
    pub fn advance(&mut self, step: Duration) -> Option<Visibility> {
        if self.countdown.advance(step) {
            Some(Visibility::Hidden)
        } else {
            None
        }
    }
}

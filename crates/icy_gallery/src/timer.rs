//! Cancellable scheduled tasks driven by explicit time steps.
//!
//! Nothing in here reads the wall clock. The owner advances every task with the
//! same `delta`, which lets tests run minutes of viewer time in microseconds.

use std::time::Duration;

/// Whether a task fires once or keeps re-arming itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Every,
}

/// A start/cancel handle around a countdown.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    interval: Duration,
    repeat: Repeat,
    /// Time left until the next firing, `None` while idle
    remaining: Option<Duration>,
}

impl ScheduledTask {
    pub fn once(interval: Duration) -> Self {
        Self {
            interval,
            repeat: Repeat::Once,
            remaining: None,
        }
    }

    pub fn every(interval: Duration) -> Self {
        Self {
            // a zero period would fire forever within one step
            interval: interval.max(Duration::from_millis(1)),
            repeat: Repeat::Every,
            remaining: None,
        }
    }

    /// (Re)start the countdown from the full interval
    pub fn start(&mut self) {
        self.remaining = Some(self.interval);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval. An active task restarts at the new rate.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = match self.repeat {
            Repeat::Once => interval,
            Repeat::Every => interval.max(Duration::from_millis(1)),
        };
        if self.is_active() {
            self.start();
        }
    }

    /// Time until the next firing
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Advance by `step` and report whether the task fired.
    ///
    /// `step` must not exceed [`Self::remaining`]; callers split larger deltas at
    /// the earliest deadline so firings are handled one at a time and in order.
    pub fn advance(&mut self, step: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        debug_assert!(step <= remaining, "step {:?} overshoots deadline {:?}", step, remaining);

        let left = remaining.saturating_sub(step);
        if !left.is_zero() {
            self.remaining = Some(left);
            return false;
        }

        self.remaining = match self.repeat {
            Repeat::Once => None,
            Repeat::Every => Some(self.interval),
        };
        true
    }
}

/// Earliest deadline among a set of tasks
pub fn next_deadline<'a>(tasks: impl IntoIterator<Item = &'a ScheduledTask>) -> Option<Duration> {
    tasks.into_iter().filter_map(ScheduledTask::remaining).min()
}

//! Timed slideshow with live progress.
//!
//! A repeating tick accumulates the time shown for the current slide. Once the
//! slide time reaches the configured speed the controller asks the viewer to
//! advance; the progress value is only for display.

use std::time::Duration;

use crate::session::ViewerSession;
use crate::timer::ScheduledTask;

pub const DEFAULT_SPEED_MS: u64 = 3000;
pub const MIN_SPEED_MS: u64 = 1000;
pub const MAX_SPEED_MS: u64 = 10_000;
/// Step used by the speed up / slow down commands
pub const SPEED_STEP_MS: u64 = 1000;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Playing,
}

#[derive(Debug, Clone)]
pub struct SlideshowController {
    state: PlayState,
    tick: ScheduledTask,
    /// Time the current slide has been shown while playing
    elapsed: Duration,
    speed: Duration,
}

impl Default for SlideshowController {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl SlideshowController {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            state: PlayState::Stopped,
            tick: ScheduledTask::every(tick_interval),
            elapsed: Duration::ZERO,
            speed: Duration::from_millis(DEFAULT_SPEED_MS),
        }
    }

    pub fn clamp_speed(ms: u64) -> u64 {
        ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS)
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed.as_millis() as u64
    }

    /// Progress of the current slide in percent, `0.0..=100.0`
    pub fn progress(&self) -> f32 {
        if self.speed.is_zero() {
            return 0.0;
        }
        let ratio = self.elapsed.as_secs_f64() / self.speed.as_secs_f64();
        (ratio * 100.0).min(100.0) as f32
    }

    pub fn task(&self) -> &ScheduledTask {
        &self.tick
    }

    /// Start playing. Refused for sessions that cannot navigate.
    pub fn play(&mut self, session: &mut ViewerSession) -> bool {
        if !session.can_navigate() {
            return false;
        }
        if self.is_playing() {
            return true;
        }
        self.state = PlayState::Playing;
        self.elapsed = Duration::ZERO;
        self.tick.start();
        session.is_playing = true;
        log::debug!("[Slideshow] Playing at {}ms per slide", self.speed_ms());
        true
    }

    pub fn pause(&mut self, session: &mut ViewerSession) {
        self.state = PlayState::Stopped;
        self.tick.cancel();
        self.elapsed = Duration::ZERO;
        session.is_playing = false;
    }

    pub fn stop(&mut self, session: &mut ViewerSession) {
        if self.is_playing() {
            log::debug!("[Slideshow] Stopped");
        }
        self.pause(session);
    }

    /// Returns the new play state
    pub fn toggle(&mut self, session: &mut ViewerSession) -> PlayState {
        if self.is_playing() {
            self.pause(session);
        } else {
            self.play(session);
        }
        self.state
    }

    /// Set the time per slide, clamped to the allowed range.
    ///
    /// While playing the tick restarts at the new rate; the slide keeps its
    /// relative progress.
    pub fn set_speed(&mut self, session: &mut ViewerSession, ms: u64) -> u64 {
        let ms = Self::clamp_speed(ms);
        let new_speed = Duration::from_millis(ms);
        if self.is_playing() && !self.speed.is_zero() {
            let ratio = self.elapsed.as_secs_f64() / self.speed.as_secs_f64();
            self.elapsed = new_speed.mul_f64(ratio.min(1.0));
            self.tick.start();
        }
        self.speed = new_speed;
        session.slideshow_speed_ms = ms;
        ms
    }

    /// The shown item changed, start its slide time from zero
    pub fn reset_progress(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Advance by at most the remaining tick time.
    /// Returns true when the slide time is up and the viewer should move on.
    pub fn advance(&mut self, step: Duration) -> bool {
        if !self.is_playing() || !self.tick.advance(step) {
            return false;
        }
        self.elapsed += self.tick.interval();
        if self.elapsed >= self.speed {
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(count: usize) -> ViewerSession {
        ViewerSession::open(count, 0, DEFAULT_SPEED_MS, false)
    }

    fn run(controller: &mut SlideshowController, ms: u64) -> usize {
        let mut advances = 0;
        for _ in 0..ms / 50 {
            if controller.advance(Duration::from_millis(50)) {
                advances += 1;
            }
        }
        advances
    }

    #[test]
    fn test_single_item_cannot_play() {
        let mut session = session(1);
        let mut controller = SlideshowController::default();
        assert!(!controller.play(&mut session));
        assert!(!session.is_playing());
    }

    #[test]
    fn test_advance_after_speed_elapsed() {
        let mut session = session(4);
        let mut controller = SlideshowController::default();
        controller.play(&mut session);
        assert_eq!(run(&mut controller, 2950), 0);
        assert!(controller.progress() > 98.0);
        assert_eq!(run(&mut controller, 50), 1);
        assert_eq!(controller.progress(), 0.0);
    }

    #[test]
    fn test_progress_never_exceeds_100() {
        let mut session = session(4);
        let mut controller = SlideshowController::default();
        controller.play(&mut session);
        for _ in 0..500 {
            controller.advance(Duration::from_millis(50));
            assert!(controller.progress() <= 100.0);
        }
    }

    #[test]
    fn test_pause_resets_progress() {
        let mut session = session(4);
        let mut controller = SlideshowController::default();
        controller.play(&mut session);
        run(&mut controller, 1000);
        controller.pause(&mut session);
        assert_eq!(controller.progress(), 0.0);
        assert!(!session.is_playing());
        assert!(!controller.task().is_active());
        assert_eq!(run(&mut controller, 5000), 0);
    }

    #[test]
    fn test_set_speed_clamps() {
        let mut session = session(4);
        let mut controller = SlideshowController::default();
        assert_eq!(controller.set_speed(&mut session, 200), MIN_SPEED_MS);
        assert_eq!(controller.set_speed(&mut session, 60_000), MAX_SPEED_MS);
        assert_eq!(session.slideshow_speed_ms(), MAX_SPEED_MS);
    }

    #[test]
    fn test_set_speed_keeps_playing() {
        let mut session = session(4);
        let mut controller = SlideshowController::default();
        controller.play(&mut session);
        run(&mut controller, 1500);
        controller.set_speed(&mut session, 6000);
        assert!(controller.is_playing());
        assert!((controller.progress() - 50.0).abs() < 0.01);
        assert_eq!(run(&mut controller, 3000), 1);
    }
}

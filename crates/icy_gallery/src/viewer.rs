//! The navigation engine.
//!
//! [`Viewer`] owns one viewing session and all of its components. Every input
//! (keys, pointer, time) goes through `&mut self`, so the reaction to an index
//! change runs to completion before the next input is looked at.
//!
//! The viewer never moves the shown item on its own: it commands the
//! [`SnapCarousel`] and reacts to the selection it reports, in
//! [`Viewer::on_index_changed`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};
use tokio::sync::mpsc;

use crate::{
    MediaItem,
    carousel::{InstantCarousel, SettlingCarousel, SnapCarousel},
    commands::{CommandSet, KeyCode, Modifiers, ViewerCommand, create_gallery_commands},
    controls::{ControlsTimer, Visibility},
    error::GalleryResult,
    frame::ViewerFrame,
    gesture::{GestureOutcome, GestureRecognizer, MoveResponse, Point, SwipeDirection},
    options::Options,
    preload::{FileLoader, LoadResult, PreloadCache, ResourceLoader},
    session::ViewerSession,
    slideshow::{PlayState, SPEED_STEP_MS, SlideshowController},
    thumbnail_window::{ThumbnailWindow, compute_window},
    timer::next_deadline,
};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseButton,
    /// Escape key or the close command
    Escape,
    Backdrop,
    /// Another `open` replaced the running session
    Replaced,
    /// The front end quit or dropped the viewer
    Shutdown,
}

/// Lifecycle notifications for the collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    Opened { index: usize, count: usize },
    Selected { index: usize },
    Closed(CloseReason),
}

pub type CloseCallback = Box<dyn FnOnce(CloseReason) + Send>;

/// Everything needed to open a session
pub struct OpenRequest {
    pub items: Arc<[MediaItem]>,
    pub initial_index: usize,
    pub autoplay: bool,
    pub autoplay_speed_ms: Option<u64>,
    pub show_metadata: bool,
    pub on_close: Option<CloseCallback>,
}

impl OpenRequest {
    pub fn new(items: impl Into<Arc<[MediaItem]>>) -> Self {
        Self {
            items: items.into(),
            initial_index: 0,
            autoplay: false,
            autoplay_speed_ms: None,
            show_metadata: false,
            on_close: None,
        }
    }

    pub fn at(mut self, initial_index: usize) -> Self {
        self.initial_index = initial_index;
        self
    }

    /// Start playing right away, optionally at a given time per slide
    pub fn autoplay(mut self, speed_ms: Option<u64>) -> Self {
        self.autoplay = true;
        self.autoplay_speed_ms = speed_ms;
        self
    }

    pub fn show_metadata(mut self, show: bool) -> Self {
        self.show_metadata = show;
        self
    }

    pub fn on_close(mut self, callback: impl FnOnce(CloseReason) + Send + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }
}

pub struct Viewer {
    items: Arc<[MediaItem]>,
    session: ViewerSession,
    carousel: Box<dyn SnapCarousel>,
    preload: PreloadCache,
    slideshow: SlideshowController,
    controls: ControlsTimer,
    gestures: GestureRecognizer,
    commands: CommandSet,
    window_size: usize,
    window: ThumbnailWindow,
    default_speed_ms: u64,
    events: Vec<ViewerEvent>,
    on_close: Option<CloseCallback>,
    last_tick: Option<Instant>,
}

/// Carousel matching the configured animation time
pub fn carousel_for(options: &Options) -> Box<dyn SnapCarousel> {
    let settle = options.carousel_settle();
    if settle.is_zero() {
        Box::new(InstantCarousel::default())
    } else {
        Box::new(SettlingCarousel::new(settle))
    }
}

impl Viewer {
    pub fn new(
        options: &Options,
        carousel: Box<dyn SnapCarousel>,
        loader: Box<dyn ResourceLoader>,
        results: mpsc::UnboundedReceiver<LoadResult>,
    ) -> GalleryResult<Self> {
        let mut commands = create_gallery_commands();
        options.apply_keymap(&mut commands)?;

        Ok(Self {
            items: Arc::from(Vec::new()),
            session: ViewerSession::default(),
            carousel,
            preload: PreloadCache::new(loader, results).with_radius(options.preload_radius),
            slideshow: SlideshowController::new(options.slideshow_tick()),
            controls: ControlsTimer::new(options.controls_hide_delay()),
            gestures: GestureRecognizer::with_thresholds(options.swipe_lock_px, options.swipe_min_px),
            commands,
            window_size: options.thumbnail_window,
            window: ThumbnailWindow::default(),
            default_speed_ms: options.default_speed_ms(),
            events: Vec::new(),
            on_close: None,
            last_tick: None,
        })
    }

    /// Viewer loading from disk and http with the configured carousel
    pub fn with_file_loader(options: &Options) -> GalleryResult<Self> {
        let (loader, results) = FileLoader::spawn()?;
        Self::new(options, carousel_for(options), Box::new(loader), results)
    }

    pub fn open(&mut self, request: OpenRequest) {
        if self.session.is_open {
            self.close(CloseReason::Replaced);
        }

        let OpenRequest {
            items,
            initial_index,
            autoplay,
            autoplay_speed_ms,
            show_metadata,
            on_close,
        } = request;

        let count = items.len();
        let speed = autoplay_speed_ms.map_or(self.default_speed_ms, SlideshowController::clamp_speed);
        self.session = ViewerSession::open(count, initial_index, speed, show_metadata);
        self.slideshow.set_speed(&mut self.session, speed);
        self.items = items;
        self.on_close = on_close;
        self.carousel.reset();
        self.preload.activate(self.items.clone());

        let index = self.session.current_index;
        self.apply_index(index);
        self.notify_activity();
        info!("[Viewer] Opened {} items at #{}", count, index);
        self.events.push(ViewerEvent::Opened { index, count });

        if autoplay && !self.slideshow.play(&mut self.session) {
            debug!("[Viewer] Autoplay ignored for {} items", count);
        }
    }

    /// End the session. Stops all timers synchronously and drops in-flight loads.
    pub fn close(&mut self, reason: CloseReason) {
        if !self.session.is_open {
            return;
        }
        self.slideshow.stop(&mut self.session);
        self.controls.cancel();
        self.gestures.pointer_cancel();
        self.carousel.reset();
        self.preload.deactivate();

        self.session = ViewerSession::default();
        self.items = Arc::from(Vec::new());
        self.window = ThumbnailWindow::default();
        self.last_tick = None;

        info!("[Viewer] Closed ({:?})", reason);
        self.events.push(ViewerEvent::Closed(reason));
        if let Some(on_close) = self.on_close.take() {
            on_close(reason);
        }
    }

    /// Scroll to `index`, clamped into the collection
    pub fn go_to(&mut self, index: usize) {
        if !self.session.is_open || self.items.is_empty() {
            return;
        }
        let target = index.min(self.items.len() - 1);
        self.carousel.scroll_to(target);
        self.pump_carousel();
    }

    pub fn next(&mut self) {
        if !self.session.can_navigate() {
            return;
        }
        let count = self.items.len();
        self.go_to((self.navigation_base() + 1) % count);
    }

    pub fn prev(&mut self) {
        if !self.session.can_navigate() {
            return;
        }
        let count = self.items.len();
        self.go_to((self.navigation_base() + count - 1) % count);
    }

    /// Index relative steps start from: the carousel's pending target while it
    /// animates, the shown item otherwise.
    fn navigation_base(&self) -> usize {
        self.carousel
            .target()
            .filter(|&index| index < self.items.len())
            .unwrap_or(self.session.current_index)
    }

    /// The carousel settled on `new_index`.
    pub fn on_index_changed(&mut self, new_index: usize) {
        if !self.session.is_open || self.items.is_empty() {
            return;
        }
        let new_index = new_index.min(self.items.len() - 1);
        if new_index == self.session.current_index {
            return;
        }
        self.apply_index(new_index);
        debug!("[Viewer] Selected #{}", new_index);
        self.events.push(ViewerEvent::Selected { index: new_index });
    }

    fn apply_index(&mut self, index: usize) {
        self.session.current_index = index;
        self.slideshow.reset_progress();
        self.preload.ensure_window(index);
        self.window = compute_window(index, self.items.len(), self.window_size);
    }

    fn pump_carousel(&mut self) {
        while let Some(index) = self.carousel.poll_selected() {
            self.on_index_changed(index);
        }
    }

    /// Run a command. Returns false if the viewer is closed.
    pub fn execute(&mut self, command: ViewerCommand) -> bool {
        if !self.session.is_open {
            return false;
        }
        match command {
            ViewerCommand::Previous => self.prev(),
            ViewerCommand::Next => self.next(),
            ViewerCommand::First => self.go_to(0),
            ViewerCommand::Last => self.go_to(self.items.len().saturating_sub(1)),
            ViewerCommand::TogglePlay => {
                self.toggle_play();
            }
            ViewerCommand::SpeedUp => {
                self.set_speed(self.session.slideshow_speed_ms.saturating_sub(SPEED_STEP_MS));
            }
            ViewerCommand::SlowDown => {
                self.set_speed(self.session.slideshow_speed_ms.saturating_add(SPEED_STEP_MS));
            }
            ViewerCommand::ToggleMetadata => self.toggle_metadata(),
            ViewerCommand::ToggleFullscreen => self.toggle_fullscreen(),
            ViewerCommand::Close => self.close(CloseReason::Escape),
        }
        true
    }

    /// Key press. Returns true if a command was bound to the key.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: Modifiers) -> bool {
        if !self.session.is_open {
            return false;
        }
        self.notify_activity();
        let Some(command) = self.commands.match_key(key, modifiers).and_then(ViewerCommand::from_id) else {
            return false;
        };
        self.execute(command)
    }

    pub fn pointer_down(&mut self, point: Point) {
        if !self.session.is_open {
            return;
        }
        self.notify_activity();
        self.gestures.pointer_down(point);
    }

    pub fn pointer_move(&mut self, point: Point) -> MoveResponse {
        if !self.session.is_open {
            return MoveResponse::PassThrough;
        }
        self.notify_activity();
        self.gestures.pointer_move(point)
    }

    pub fn pointer_up(&mut self, point: Point) -> GestureOutcome {
        if !self.session.is_open {
            return GestureOutcome::None;
        }
        let outcome = self.gestures.pointer_up(point);
        match outcome {
            GestureOutcome::Swipe(SwipeDirection::Next) => self.next(),
            GestureOutcome::Swipe(SwipeDirection::Previous) => self.prev(),
            GestureOutcome::Tap => self.notify_activity(),
            GestureOutcome::None => {}
        }
        outcome
    }

    pub fn pointer_cancel(&mut self) {
        self.gestures.pointer_cancel();
    }

    /// Pointer left the viewer surface
    pub fn pointer_left(&mut self) {
        if !self.session.is_open {
            return;
        }
        let visibility = self.controls.pointer_left();
        self.apply_visibility(visibility);
    }

    pub fn notify_activity(&mut self) {
        if !self.session.is_open {
            return;
        }
        let visibility = self.controls.notify_activity();
        self.apply_visibility(visibility);
    }

    /// Click on a thumbnail of the strip
    pub fn select_thumbnail(&mut self, index: usize) {
        if !self.session.is_open || index >= self.items.len() {
            return;
        }
        self.notify_activity();
        self.go_to(index);
    }

    fn apply_visibility(&mut self, visibility: Visibility) {
        self.session.controls_visible = visibility == Visibility::Shown;
    }

    pub fn play(&mut self) -> bool {
        self.session.is_open && self.slideshow.play(&mut self.session)
    }

    pub fn pause(&mut self) {
        if self.session.is_open {
            self.slideshow.pause(&mut self.session);
        }
    }

    pub fn toggle_play(&mut self) -> PlayState {
        if self.session.is_open {
            self.slideshow.toggle(&mut self.session)
        } else {
            self.slideshow.state()
        }
    }

    /// Time per slide, clamped. Returns the speed in effect.
    pub fn set_speed(&mut self, ms: u64) -> u64 {
        if !self.session.is_open {
            return self.session.slideshow_speed_ms;
        }
        self.slideshow.set_speed(&mut self.session, ms)
    }

    pub fn toggle_metadata(&mut self) {
        if self.session.is_open {
            self.session.metadata_overlay_visible = !self.session.metadata_overlay_visible;
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.session.is_open {
            self.session.is_fullscreen = !self.session.is_fullscreen;
        }
    }

    /// Let `delta` of time pass.
    ///
    /// The delta is split at every deadline of the slideshow tick, the controls
    /// countdown and the carousel animation, so firings are handled one by one
    /// in the order they would happen in real time.
    pub fn advance(&mut self, delta: Duration) {
        let mut left = delta;
        while self.session.is_open {
            let deadline = next_deadline([self.slideshow.task(), self.controls.task()])
                .into_iter()
                .chain(self.carousel.time_to_settle())
                .min();
            let step = match deadline {
                Some(deadline) if deadline <= left => deadline,
                _ => left,
            };

            let slide_due = self.slideshow.advance(step);
            let hidden = self.controls.advance(step);
            self.carousel.advance(step);
            left -= step;

            if let Some(visibility) = hidden {
                self.apply_visibility(visibility);
            }
            self.pump_carousel();
            if slide_due {
                self.next();
            }
            if left.is_zero() {
                break;
            }
        }
        self.poll_loads();
    }

    /// Advance by the wall-clock time since the previous call
    pub fn tick(&mut self, now: Instant) {
        if !self.session.is_open {
            self.last_tick = None;
            return;
        }
        let delta = self.last_tick.map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);
        self.advance(delta);
    }

    /// Apply finished loads. Returns the indices whose state changed.
    pub fn poll_loads(&mut self) -> Vec<usize> {
        self.preload.poll_results()
    }

    /// Drain queued lifecycle events
    pub fn take_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn frame(&self) -> Option<ViewerFrame> {
        ViewerFrame::build(self)
    }

    pub fn session(&self) -> &ViewerSession {
        &self.session
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        if !self.session.is_open {
            return None;
        }
        self.items.get(self.session.current_index)
    }

    pub fn thumbnail_window(&self) -> ThumbnailWindow {
        self.window
    }

    pub fn progress(&self) -> f32 {
        self.slideshow.progress()
    }

    pub fn play_state(&self) -> PlayState {
        self.slideshow.state()
    }

    pub fn preload(&self) -> &PreloadCache {
        &self.preload
    }

    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    pub fn is_tracking_gesture(&self) -> bool {
        self.gestures.is_tracking()
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.close(CloseReason::Shutdown);
    }
}

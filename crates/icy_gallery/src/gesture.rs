//! Swipe recognition on the image surface.
//!
//! Pointer sequences go `Idle -> Tracking -> {swipe | tap | nothing}`. Once the
//! horizontal displacement passes the lock threshold before the vertical one
//! does, the gesture is a horizontal swipe and the front end should suppress
//! its default scroll handling for the rest of it.

/// Displacement after which the gesture axis is decided (pixels)
pub const DEFAULT_LOCK_THRESHOLD: f32 = 10.0;

/// Minimum horizontal travel of a swipe that navigates (pixels)
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisLock {
    Undecided,
    Horizontal,
    /// Vertical scroll or any other non-navigational drag
    Vertical,
}

/// Transient state between pointer-down and pointer-up/cancel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeGesture {
    pub start: Point,
    pub last: Point,
    pub lock: AxisLock,
}

impl SwipeGesture {
    pub fn is_horizontal_swipe(&self) -> bool {
        self.lock == AxisLock::Horizontal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved to the left, show the next item
    Next,
    Previous,
}

/// What a finished gesture resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Swipe(SwipeDirection),
    Tap,
    None,
}

/// Answer to a pointer move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResponse {
    /// Let the platform handle the event (scrolling etc.)
    PassThrough,
    /// The gesture is a horizontal swipe, suppress default scrolling
    Suppress,
}

#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    gesture: Option<SwipeGesture>,
    lock_threshold: f32,
    swipe_threshold: f32,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::with_thresholds(DEFAULT_LOCK_THRESHOLD, DEFAULT_SWIPE_THRESHOLD)
    }

    pub fn with_thresholds(lock_threshold: f32, swipe_threshold: f32) -> Self {
        Self {
            gesture: None,
            lock_threshold,
            swipe_threshold,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn gesture(&self) -> Option<&SwipeGesture> {
        self.gesture.as_ref()
    }

    pub fn pointer_down(&mut self, point: Point) {
        self.gesture = Some(SwipeGesture {
            start: point,
            last: point,
            lock: AxisLock::Undecided,
        });
    }

    pub fn pointer_move(&mut self, point: Point) -> MoveResponse {
        let lock_threshold = self.lock_threshold;
        let Some(gesture) = self.gesture.as_mut() else {
            return MoveResponse::PassThrough;
        };
        gesture.last = point;
        update_lock(gesture, lock_threshold);

        if gesture.is_horizontal_swipe() {
            MoveResponse::Suppress
        } else {
            MoveResponse::PassThrough
        }
    }

    /// Finish the gesture. The release point counts as a last move.
    pub fn pointer_up(&mut self, point: Point) -> GestureOutcome {
        let Some(mut gesture) = self.gesture.take() else {
            return GestureOutcome::None;
        };
        gesture.last = point;
        update_lock(&mut gesture, self.lock_threshold);

        let delta_x = gesture.start.x - point.x;
        let delta_y = gesture.start.y - point.y;

        if gesture.is_horizontal_swipe() && delta_x.abs() >= self.swipe_threshold && delta_x.abs() > delta_y.abs() {
            return if delta_x > 0.0 {
                GestureOutcome::Swipe(SwipeDirection::Next)
            } else {
                GestureOutcome::Swipe(SwipeDirection::Previous)
            };
        }

        if gesture.lock == AxisLock::Undecided {
            GestureOutcome::Tap
        } else {
            GestureOutcome::None
        }
    }

    /// The platform took the pointer away (system gesture etc.)
    pub fn pointer_cancel(&mut self) {
        self.gesture = None;
    }
}

fn update_lock(gesture: &mut SwipeGesture, lock_threshold: f32) {
    if gesture.lock != AxisLock::Undecided {
        return;
    }
    let dx = (gesture.last.x - gesture.start.x).abs();
    let dy = (gesture.last.y - gesture.start.y).abs();
    if dx > lock_threshold && dx > dy {
        gesture.lock = AxisLock::Horizontal;
    } else if dy > lock_threshold {
        gesture.lock = AxisLock::Vertical;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(recognizer: &mut GestureRecognizer, dx: f32, dy: f32) -> GestureOutcome {
        recognizer.pointer_down(Point::new(200.0, 200.0));
        recognizer.pointer_move(Point::new(200.0 + dx / 2.0, 200.0 + dy / 2.0));
        recognizer.pointer_up(Point::new(200.0 + dx, 200.0 + dy))
    }

    #[test]
    fn test_swipe_left_is_next() {
        let mut r = GestureRecognizer::new();
        assert_eq!(swipe(&mut r, -60.0, 10.0), GestureOutcome::Swipe(SwipeDirection::Next));
        assert!(!r.is_tracking());
    }

    #[test]
    fn test_swipe_right_is_previous() {
        let mut r = GestureRecognizer::new();
        assert_eq!(swipe(&mut r, 60.0, 10.0), GestureOutcome::Swipe(SwipeDirection::Previous));
    }

    #[test]
    fn test_short_swipe_does_nothing() {
        let mut r = GestureRecognizer::new();
        assert_eq!(swipe(&mut r, -30.0, 0.0), GestureOutcome::None);
    }

    #[test]
    fn test_vertical_drag_does_nothing() {
        let mut r = GestureRecognizer::new();
        assert_eq!(swipe(&mut r, -60.0, 80.0), GestureOutcome::None);
    }

    #[test]
    fn test_vertical_first_never_locks_horizontal() {
        let mut r = GestureRecognizer::new();
        r.pointer_down(Point::new(0.0, 0.0));
        assert_eq!(r.pointer_move(Point::new(2.0, 15.0)), MoveResponse::PassThrough);
        assert_eq!(r.pointer_move(Point::new(-120.0, 16.0)), MoveResponse::PassThrough);
        assert_eq!(r.pointer_up(Point::new(-120.0, 16.0)), GestureOutcome::None);
    }

    #[test]
    fn test_horizontal_lock_suppresses_scroll() {
        let mut r = GestureRecognizer::new();
        r.pointer_down(Point::new(0.0, 0.0));
        assert_eq!(r.pointer_move(Point::new(-5.0, 1.0)), MoveResponse::PassThrough);
        assert_eq!(r.pointer_move(Point::new(-12.0, 1.0)), MoveResponse::Suppress);
        assert_eq!(r.pointer_move(Point::new(-14.0, 40.0)), MoveResponse::Suppress);
    }

    #[test]
    fn test_tap() {
        let mut r = GestureRecognizer::new();
        r.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(r.pointer_up(Point::new(12.0, 11.0)), GestureOutcome::Tap);
    }

    #[test]
    fn test_cancel_resets() {
        let mut r = GestureRecognizer::new();
        r.pointer_down(Point::new(0.0, 0.0));
        r.pointer_move(Point::new(-80.0, 0.0));
        r.pointer_cancel();
        assert!(!r.is_tracking());
        assert_eq!(r.pointer_up(Point::new(-100.0, 0.0)), GestureOutcome::None);
    }

    #[test]
    fn test_up_without_down() {
        let mut r = GestureRecognizer::new();
        assert_eq!(r.pointer_up(Point::new(5.0, 5.0)), GestureOutcome::None);
        assert_eq!(r.pointer_move(Point::new(5.0, 5.0)), MoveResponse::PassThrough);
    }
}

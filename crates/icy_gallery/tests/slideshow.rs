mod common;

use std::time::Instant;

use common::{items, ms, open_viewer, viewer};
use icy_gallery::{CloseReason, KeyCode, Modifiers, OpenRequest, PlayState, ViewerEvent};
use pretty_assertions::assert_eq;

#[test]
fn test_one_advance_per_interval() {
    let (mut viewer, _) = open_viewer(5, 0);
    assert!(viewer.play());
    viewer.advance(ms(2999));
    assert_eq!(viewer.session().current_index(), 0);
    viewer.advance(ms(1));
    assert_eq!(viewer.session().current_index(), 1);
    assert_eq!(viewer.progress(), 0.0);
    assert_eq!(viewer.take_events(), vec![ViewerEvent::Selected { index: 1 }]);
}

#[test]
fn test_slideshow_wraps_around() {
    let (mut viewer, _) = open_viewer(3, 1);
    viewer.play();
    viewer.advance(ms(6000));
    assert_eq!(viewer.session().current_index(), 0);
    assert!(viewer.session().is_playing());
}

#[test]
fn test_progress_bounds() {
    let (mut viewer, _) = open_viewer(4, 0);
    viewer.play();
    for _ in 0..200 {
        viewer.advance(ms(37));
        let progress = viewer.progress();
        assert!((0.0..=100.0).contains(&progress), "progress {progress}");
    }
}

#[test]
fn test_manual_navigation_resets_progress_and_keeps_playing() {
    let (mut viewer, _) = open_viewer(6, 0);
    viewer.play();
    viewer.advance(ms(2000));
    assert!(viewer.progress() > 60.0);

    viewer.go_to(4);
    assert_eq!(viewer.progress(), 0.0);
    assert!(viewer.session().is_playing());

    viewer.advance(ms(2999));
    assert_eq!(viewer.session().current_index(), 4);
    viewer.advance(ms(1));
    assert_eq!(viewer.session().current_index(), 5);
}

#[test]
fn test_space_toggles_play() {
    let (mut viewer, _) = open_viewer(4, 0);
    viewer.handle_key(KeyCode::Space, Modifiers::NONE);
    assert_eq!(viewer.play_state(), PlayState::Playing);
    viewer.advance(ms(1500));
    viewer.handle_key(KeyCode::Space, Modifiers::NONE);
    assert_eq!(viewer.play_state(), PlayState::Stopped);
    assert_eq!(viewer.progress(), 0.0);

    viewer.advance(ms(20_000));
    assert_eq!(viewer.session().current_index(), 0);
}

#[test]
fn test_set_speed_while_playing() {
    let (mut viewer, _) = open_viewer(4, 0);
    viewer.play();
    assert_eq!(viewer.set_speed(5000), 5000);
    assert!(viewer.session().is_playing());
    viewer.advance(ms(4999));
    assert_eq!(viewer.session().current_index(), 0);
    viewer.advance(ms(1));
    assert_eq!(viewer.session().current_index(), 1);
}

#[test]
fn test_speed_keys_are_clamped() {
    let (mut viewer, _) = open_viewer(4, 0);
    for _ in 0..5 {
        viewer.handle_key(KeyCode::Plus, Modifiers::NONE);
    }
    assert_eq!(viewer.session().slideshow_speed_ms(), 1000);
    for _ in 0..15 {
        viewer.handle_key(KeyCode::Minus, Modifiers::NONE);
    }
    assert_eq!(viewer.session().slideshow_speed_ms(), 10_000);
}

#[test]
fn test_autoplay_with_speed() {
    let (mut viewer, _) = viewer();
    viewer.open(OpenRequest::new(items(3)).autoplay(Some(200)));
    assert!(viewer.session().is_playing());
    assert_eq!(viewer.session().slideshow_speed_ms(), 1000);
    viewer.advance(ms(1000));
    assert_eq!(viewer.session().current_index(), 1);
}

#[test]
fn test_autoplay_ignored_for_single_item() {
    let (mut viewer, _) = viewer();
    viewer.open(OpenRequest::new(items(1)).autoplay(None));
    assert!(!viewer.session().is_playing());
}

#[test]
fn test_close_stops_slideshow() {
    let (mut viewer, _) = open_viewer(4, 0);
    viewer.play();
    viewer.close(CloseReason::CloseButton);
    assert!(!viewer.session().is_playing());
    assert_eq!(viewer.play_state(), PlayState::Stopped);

    viewer.open(OpenRequest::new(items(4)));
    viewer.advance(ms(10_000));
    assert_eq!(viewer.session().current_index(), 0);
}

#[test]
fn test_tick_uses_wall_clock_deltas() {
    let (mut viewer, _) = open_viewer(4, 0);
    viewer.play();
    let start = Instant::now();
    viewer.tick(start);
    viewer.tick(start + ms(1500));
    assert_eq!(viewer.session().current_index(), 0);
    viewer.tick(start + ms(3000));
    assert_eq!(viewer.session().current_index(), 1);
}

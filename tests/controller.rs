use std::sync::Arc;

use route_replay::error::PlaybackError;
use route_replay::playback::clock::ReanchorPolicy;
use route_replay::playback::controller::PlaybackController;
use route_replay::types::frame::PlaybackStatus;
use route_replay::types::route::{Point, Route};

fn untimed_route(n: usize) -> Arc<Route> {
    let points = (0..n)
        .map(|i| Point {
            lat: 52.0 + i as f64 * 0.001,
            lng: 13.0,
            timestamp: None,
        })
        .collect();
    Arc::new(Route::new(points).expect("route"))
}

fn controller(n: usize, policy: ReanchorPolicy) -> PlaybackController {
    PlaybackController::new(untimed_route(n), 1.0, policy).expect("controller")
}

#[test]
fn starts_stopped_at_first_point() {
    let c = controller(3, ReanchorPolicy::Preserve);
    let frame = c.current_frame();
    assert_eq!(c.status(), PlaybackStatus::Stopped);
    assert_eq!(frame.sample.position, c.route().points()[0].lat_lng());
    assert_eq!(frame.sample.speed_mps, None);
    assert_eq!(frame.display.speed, "–");
    assert_eq!(frame.display.elapsed, "00:00");
    assert_eq!(frame.path.len(), 1);
}

#[test]
fn tick_is_ignored_unless_playing() {
    let mut c = controller(3, ReanchorPolicy::Preserve);
    assert_eq!(c.tick(500.0), Ok(None));

    c.play(0.0);
    assert!(c.tick(100.0).expect("tick").is_some());

    c.pause(100.0);
    assert_eq!(c.tick(200.0), Ok(None));
    assert_eq!(c.status(), PlaybackStatus::Paused);
}

#[test]
fn play_while_playing_keeps_the_anchor() {
    let mut c = controller(3, ReanchorPolicy::Preserve);
    c.play(0.0);
    c.play(400.0);
    let frame = c.tick(500.0).expect("tick").expect("frame");
    assert!((frame.sample.elapsed_ms - 500.0).abs() < 1e-9);
}

#[test]
fn tick_builds_progress_path() {
    let mut c = controller(4, ReanchorPolicy::Preserve);
    c.play(0.0);
    let frame = c.tick(1_500.0).expect("tick").expect("frame");

    assert_eq!(frame.segment_index, 1);
    assert_eq!(frame.path.len(), 3);
    assert_eq!(frame.path[1], c.route().points()[1].lat_lng());
    assert_eq!(frame.path[2], frame.sample.position);
    assert_eq!(frame.display.elapsed, "00:01");
    assert!(frame.display.speed.ends_with(" m/s"));
}

#[test]
fn reaching_the_end_stops_playback() {
    let mut c = controller(3, ReanchorPolicy::Preserve);
    c.play(0.0);
    let frame = c.tick(2_600.0).expect("tick").expect("frame");

    assert!(frame.is_at_end);
    assert_eq!(frame.status, PlaybackStatus::Ended);
    assert_eq!(c.status(), PlaybackStatus::Ended);
    assert_eq!(frame.sample.position, c.route().points()[2].lat_lng());
    assert_eq!(frame.path.len(), 3);
    assert_eq!(c.tick(3_000.0), Ok(None));
}

#[test]
fn play_after_end_replays_from_start() {
    let mut c = controller(2, ReanchorPolicy::Preserve);
    c.play(0.0);
    c.tick(5_000.0).expect("tick");
    assert_eq!(c.status(), PlaybackStatus::Ended);

    c.play(10_000.0);
    let frame = c.tick(10_100.0).expect("tick").expect("frame");
    assert_eq!(frame.segment_index, 0);
    assert!((frame.sample.elapsed_ms - 100.0).abs() < 1e-9);
}

#[test]
fn reset_returns_to_first_point_from_any_state() {
    let mut c = controller(3, ReanchorPolicy::Preserve);
    c.play(0.0);
    c.tick(1_700.0).expect("tick");

    let frame = c.reset();
    assert_eq!(c.status(), PlaybackStatus::Stopped);
    assert_eq!(c.segment_index(), 0);
    assert_eq!(frame.segment_index, 0);
    assert_eq!(frame.sample.elapsed_ms, 0.0);
    assert_eq!(frame.sample.position, c.route().points()[0].lat_lng());
    assert_eq!(c.tick(1_800.0), Ok(None));

    c.play(2_000.0);
    let frame = c.tick(2_250.0).expect("tick").expect("frame");
    assert!((frame.sample.elapsed_ms - 250.0).abs() < 1e-9);
}

#[test]
fn pause_and_resume_do_not_skip_ahead() {
    let mut c = controller(3, ReanchorPolicy::Preserve);
    c.play(0.0);
    c.tick(400.0).expect("tick");
    let paused = c.pause(400.0);
    assert_eq!(paused.status, PlaybackStatus::Paused);

    c.play(60_000.0);
    let frame = c.tick(60_100.0).expect("tick").expect("frame");
    assert!((frame.sample.elapsed_ms - 500.0).abs() < 1e-9);
}

#[test]
fn toggle_flips_between_playing_and_paused() {
    let mut c = controller(3, ReanchorPolicy::Preserve);
    assert_eq!(c.toggle(0.0).status, PlaybackStatus::Playing);
    assert_eq!(c.toggle(10.0).status, PlaybackStatus::Paused);
    assert_eq!(c.toggle(20.0).status, PlaybackStatus::Playing);
}

#[test]
fn speed_change_does_not_move_the_vehicle_backward() {
    let mut c = controller(3, ReanchorPolicy::Preserve);
    c.play(0.0);
    let before = c.tick(500.0).expect("tick").expect("frame");

    c.set_speed(2.0, 500.0).expect("speed");
    let after = c.tick(516.0).expect("tick").expect("frame");

    assert!(after.sample.elapsed_ms >= before.sample.elapsed_ms);
    assert!((after.sample.elapsed_ms - 532.0).abs() < 1e-9);
    let step = after.sample.position.lat - before.sample.position.lat;
    assert!(step >= 0.0);
    assert!(step <= 0.001 * 32.0 / 1000.0 + 1e-12);
    assert_eq!(after.speed_multiplier, 2.0);
}

#[test]
fn restart_policy_reproduces_the_speed_change_jump() {
    let mut c = controller(3, ReanchorPolicy::Restart);
    c.play(0.0);
    let before = c.tick(500.0).expect("tick").expect("frame");

    c.set_speed(2.0, 500.0).expect("speed");
    let after = c.tick(516.0).expect("tick").expect("frame");

    assert!(after.sample.elapsed_ms < before.sample.elapsed_ms);
    assert!((after.sample.elapsed_ms - 32.0).abs() < 1e-9);
}

#[test]
fn invalid_speed_is_rejected_without_side_effects() {
    let mut c = controller(3, ReanchorPolicy::Preserve);
    c.play(0.0);
    assert_eq!(
        c.set_speed(0.0, 100.0),
        Err(PlaybackError::InvalidSpeed(0.0))
    );
    assert_eq!(c.speed(), 1.0);
    assert!(c.is_playing());
}

#[test]
fn speed_change_while_paused_applies_on_resume() {
    let mut c = controller(3, ReanchorPolicy::Preserve);
    c.play(0.0);
    c.pause(300.0);
    c.set_speed(4.0, 1_000.0).expect("speed");
    assert_eq!(c.status(), PlaybackStatus::Paused);

    c.play(2_000.0);
    let frame = c.tick(2_100.0).expect("tick").expect("frame");
    assert!((frame.sample.elapsed_ms - 700.0).abs() < 1e-9);
}

#[test]
fn play_after_end_returns_a_rewound_frame() {
    let mut c = controller(3, ReanchorPolicy::Preserve);
    c.play(0.0);
    c.tick(5_000.0).expect("tick");
    assert_eq!(c.status(), PlaybackStatus::Ended);

    let frame = c.play(6_000.0);
    assert_eq!(frame.status, PlaybackStatus::Playing);
    assert!(!frame.is_at_end);
    assert_eq!(frame.segment_index, 0);
    assert_eq!(frame.sample.elapsed_ms, 0.0);
    assert_eq!(frame.sample.position, c.route().points()[0].lat_lng());
    assert_eq!(frame.path.len(), 1);
    assert_eq!(c.current_frame(), &frame);
}

use std::time::Duration;

use route_replay::config::Config;
use route_replay::playback::clock::ReanchorPolicy;

#[test]
fn defaults_run_at_sixty_frames_per_second() {
    let config = Config::default();
    assert_eq!(config.port, 3000);
    assert_eq!(config.frame_interval, Duration::from_secs_f64(1.0 / 60.0));
    assert_eq!(config.default_speed, 1.0);
    assert_eq!(config.reanchor_policy, ReanchorPolicy::Preserve);
}

#[test]
fn from_env_falls_back_to_default_frame_interval() {
    if std::env::var("FRAME_RATE_HZ").is_ok() {
        return;
    }
    assert_eq!(
        Config::from_env().frame_interval,
        Config::default().frame_interval
    );
}

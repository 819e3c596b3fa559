use std::time::Duration;

use crate::pipeline::load::RouteSource;
use crate::playback::clock::ReanchorPolicy;

const DEFAULT_ROUTE_SOURCE: &str = "data/dummy-route.json";
const DEFAULT_FRAME_RATE_HZ: u32 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub route_source: RouteSource,
    pub frame_interval: Duration,
    pub default_speed: f64,
    pub reanchor_policy: ReanchorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            route_source: RouteSource::parse(DEFAULT_ROUTE_SOURCE),
            frame_interval: frame_interval(DEFAULT_FRAME_RATE_HZ),
            default_speed: 1.0,
            reanchor_policy: ReanchorPolicy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let route_source = std::env::var("ROUTE_SOURCE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|s| RouteSource::parse(s.trim()))
            .unwrap_or(defaults.route_source);

        let interval = std::env::var("FRAME_RATE_HZ")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .map(frame_interval)
            .unwrap_or(defaults.frame_interval);

        let default_speed = std::env::var("DEFAULT_SPEED")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|speed| speed.is_finite() && *speed > 0.0)
            .unwrap_or(defaults.default_speed);

        let reanchor_policy = std::env::var("REANCHOR_POLICY")
            .ok()
            .and_then(|s| ReanchorPolicy::from_str(&s))
            .unwrap_or(defaults.reanchor_policy);

        Self {
            port,
            route_source,
            frame_interval: interval,
            default_speed,
            reanchor_policy,
        }
    }
}

fn frame_interval(frame_rate_hz: u32) -> Duration {
    let hz = frame_rate_hz.clamp(1, 240);
    Duration::from_secs_f64(1.0 / hz as f64)
}

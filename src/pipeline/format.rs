use chrono::{DateTime, Utc};

use crate::types::frame::{Sample, StatsDisplay};

const PLACEHOLDER: &str = "–";

/// `MM:SS`, zero-padded; `00:00` for zero, negative or non-finite input.
pub fn format_elapsed(elapsed_ms: f64) -> String {
    if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
        return "00:00".to_string();
    }
    let total_seconds = (elapsed_ms / 1000.0).floor() as u64;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub fn format_speed(speed_mps: Option<f64>) -> String {
    match speed_mps {
        Some(speed) if speed.is_finite() => format!("{:.1} m/s", speed),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn format_coordinate(value: f64) -> String {
    format!("{:.6}", value)
}

pub fn format_timestamp(timestamp_ms: Option<i64>) -> String {
    timestamp_ms
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn stats_display(sample: &Sample) -> StatsDisplay {
    StatsDisplay {
        latitude: format_coordinate(sample.position.lat),
        longitude: format_coordinate(sample.position.lng),
        timestamp: format_timestamp(sample.timestamp),
        speed: format_speed(sample.speed_mps),
        elapsed: format_elapsed(sample.elapsed_ms),
    }
}

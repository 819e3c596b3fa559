use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One frame's position/speed/elapsed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub position: LatLng,
    /// Interpolated epoch milliseconds, when the active segment is timestamped.
    pub timestamp: Option<i64>,
    /// `None` when the speed is undefined (e.g. at reset).
    pub speed_mps: Option<f64>,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
    Ended,
}

impl PlaybackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Stopped => "stopped",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Ended => "ended",
        }
    }
}

/// Text fields shown next to the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsDisplay {
    pub latitude: String,
    pub longitude: String,
    pub timestamp: String,
    pub speed: String,
    pub elapsed: String,
}

/// Everything a render sink needs for one redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub sample: Sample,
    pub segment_index: usize,
    pub is_at_end: bool,
    /// Route points up to the active segment start, then the interpolated position.
    pub path: Vec<LatLng>,
    pub status: PlaybackStatus,
    pub speed_multiplier: f64,
    pub display: StatsDisplay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

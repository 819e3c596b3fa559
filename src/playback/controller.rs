use std::sync::Arc;

use crate::error::PlaybackError;
use crate::pipeline::format;
use crate::playback::clock::{PlaybackClock, ReanchorPolicy};
use crate::playback::resolver::{self, Resolution};
use crate::types::frame::{Frame, LatLng, PlaybackStatus, Sample};
use crate::types::route::Route;

/// Play/pause/reset state machine over one route.
///
/// All methods take the current wall-clock reading in milliseconds so the
/// controller stays free of any time source.
pub struct PlaybackController {
    route: Arc<Route>,
    clock: PlaybackClock,
    status: PlaybackStatus,
    segment_index: usize,
    current: Frame,
}

impl PlaybackController {
    pub fn new(
        route: Arc<Route>,
        speed: f64,
        policy: ReanchorPolicy,
    ) -> Result<Self, PlaybackError> {
        let clock = PlaybackClock::new(speed, policy)?;
        let current = initial_frame(&route, speed);
        Ok(Self {
            route,
            clock,
            status: PlaybackStatus::Stopped,
            segment_index: 0,
            current,
        })
    }

    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn speed(&self) -> f64 {
        self.clock.speed()
    }

    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    pub fn current_frame(&self) -> &Frame {
        &self.current
    }

    pub fn reset(&mut self) -> Frame {
        self.clock.clear();
        self.status = PlaybackStatus::Stopped;
        self.segment_index = 0;
        self.current = initial_frame(&self.route, self.clock.speed());
        tracing::debug!("Playback reset");
        self.current.clone()
    }

    /// No-op while already playing. Replays from the start once the route has ended.
    pub fn play(&mut self, now: f64) -> Frame {
        match self.status {
            PlaybackStatus::Playing => return self.current.clone(),
            PlaybackStatus::Ended => {
                self.clock.clear();
                self.segment_index = 0;
                self.current = initial_frame(&self.route, self.clock.speed());
            }
            PlaybackStatus::Stopped | PlaybackStatus::Paused => {}
        }

        self.clock.start(now);
        self.set_status(PlaybackStatus::Playing);
        tracing::debug!(
            "Playback started at {:.0} ms virtual, {}x",
            self.clock.virtual_elapsed_ms(now),
            self.clock.speed()
        );
        self.current.clone()
    }

    pub fn pause(&mut self, now: f64) -> Frame {
        if self.status == PlaybackStatus::Playing {
            self.clock.hold(now);
            self.set_status(PlaybackStatus::Paused);
            tracing::debug!("Playback paused on segment {}", self.segment_index);
        }
        self.current.clone()
    }

    pub fn toggle(&mut self, now: f64) -> Frame {
        if self.is_playing() {
            self.pause(now)
        } else {
            self.play(now)
        }
    }

    pub fn set_speed(&mut self, multiplier: f64, now: f64) -> Result<Frame, PlaybackError> {
        self.clock.set_speed(multiplier, now, self.is_playing())?;
        self.current.speed_multiplier = multiplier;
        tracing::debug!("Playback speed set to {}x", multiplier);
        Ok(self.current.clone())
    }

    /// One scheduled frame. Returns `None` when not playing, so a stale tick has no effect.
    ///
    /// Reaching the end of the route moves to `Ended`; a failed frame moves to `Paused`.
    pub fn tick(&mut self, now: f64) -> Result<Option<Frame>, PlaybackError> {
        if !self.is_playing() {
            return Ok(None);
        }

        let elapsed = self.clock.virtual_elapsed_ms(now);
        let resolution = resolver::resolve(&self.route, elapsed);

        let position = resolution.sample.position;
        if !position.lat.is_finite() || !position.lng.is_finite() {
            self.clock.hold(now);
            self.set_status(PlaybackStatus::Paused);
            return Err(PlaybackError::NonFinitePosition {
                segment: resolution.segment_index,
            });
        }

        self.segment_index = resolution.segment_index;
        if resolution.is_at_end {
            self.clock.hold(now);
            self.status = PlaybackStatus::Ended;
            tracing::debug!("End of route reached");
        }

        self.current = build_frame(&self.route, &resolution, self.status, self.clock.speed());
        Ok(Some(self.current.clone()))
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        self.status = status;
        self.current.status = status;
    }
}

fn initial_frame(route: &Route, speed: f64) -> Frame {
    let first = route.first();
    let sample = Sample {
        position: first.lat_lng(),
        timestamp: first.timestamp,
        speed_mps: None,
        elapsed_ms: 0.0,
    };
    Frame {
        display: format::stats_display(&sample),
        sample,
        segment_index: 0,
        is_at_end: false,
        path: vec![first.lat_lng()],
        status: PlaybackStatus::Stopped,
        speed_multiplier: speed,
        error: None,
    }
}

fn build_frame(route: &Route, resolution: &Resolution, status: PlaybackStatus, speed: f64) -> Frame {
    Frame {
        display: format::stats_display(&resolution.sample),
        sample: resolution.sample,
        segment_index: resolution.segment_index,
        is_at_end: resolution.is_at_end,
        path: progress_path(route, resolution.segment_index, resolution.sample.position),
        status,
        speed_multiplier: speed,
        error: None,
    }
}

fn progress_path(route: &Route, segment_index: usize, position: LatLng) -> Vec<LatLng> {
    let mut path: Vec<LatLng> = route.points()[..=segment_index]
        .iter()
        .map(|p| p.lat_lng())
        .collect();
    path.push(position);
    path
}

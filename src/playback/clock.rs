use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

/// How the anchor is moved when speed changes or playback resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReanchorPolicy {
    /// Keep virtual elapsed time continuous across speed changes and pauses.
    #[default]
    Preserve,
    /// Restart the virtual clock at "now" on speed change; keep the anchor across pauses.
    Restart,
}

impl ReanchorPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "preserve" => Some(ReanchorPolicy::Preserve),
            "restart" => Some(ReanchorPolicy::Restart),
            _ => None,
        }
    }
}

/// Maps wall-clock milliseconds to virtual elapsed milliseconds.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    speed: f64,
    started_at: Option<f64>,
    /// Virtual time frozen while paused.
    held_ms: Option<f64>,
    policy: ReanchorPolicy,
}

impl PlaybackClock {
    pub fn new(speed: f64, policy: ReanchorPolicy) -> Result<Self, PlaybackError> {
        validate_speed(speed)?;
        Ok(Self {
            speed,
            started_at: None,
            held_ms: None,
            policy,
        })
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn policy(&self) -> ReanchorPolicy {
        self.policy
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    pub fn is_anchored(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn virtual_elapsed_ms(&self, now: f64) -> f64 {
        if let Some(held) = self.held_ms {
            return held;
        }
        match self.started_at {
            Some(started_at) => ((now - started_at) * self.speed).max(0.0),
            None => 0.0,
        }
    }

    /// Sets the anchor to `now`, restarting virtual time from zero.
    pub fn reanchor(&mut self, now: f64) {
        self.started_at = Some(now);
        self.held_ms = None;
    }

    /// Sets the anchor so that `virtual_elapsed_ms(now) == elapsed_ms`.
    pub fn reanchor_at(&mut self, now: f64, elapsed_ms: f64) {
        self.started_at = Some(now - elapsed_ms / self.speed);
        self.held_ms = None;
    }

    /// Starts or resumes the clock.
    pub fn start(&mut self, now: f64) {
        match (self.policy, self.held_ms) {
            (ReanchorPolicy::Preserve, Some(held)) => self.reanchor_at(now, held),
            _ if self.started_at.is_none() => self.reanchor(now),
            _ => self.held_ms = None,
        }
    }

    pub fn hold(&mut self, now: f64) {
        if self.policy == ReanchorPolicy::Preserve && self.started_at.is_some() {
            self.held_ms = Some(self.virtual_elapsed_ms(now));
        }
    }

    /// Changes the multiplier. A running clock is re-anchored according to the policy.
    pub fn set_speed(&mut self, speed: f64, now: f64, running: bool) -> Result<(), PlaybackError> {
        validate_speed(speed)?;
        let elapsed = self.virtual_elapsed_ms(now);
        self.speed = speed;

        if running {
            match self.policy {
                ReanchorPolicy::Preserve => self.reanchor_at(now, elapsed),
                ReanchorPolicy::Restart => self.reanchor(now),
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.started_at = None;
        self.held_ms = None;
    }
}

fn validate_speed(speed: f64) -> Result<(), PlaybackError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(PlaybackError::InvalidSpeed(speed))
    }
}

use tokio::sync::watch;

use crate::error::PlaybackError;
use crate::types::frame::Frame;

/// Receives every frame the playback loop produces.
pub trait RenderSink: Send {
    fn render(&mut self, frame: &Frame);

    /// Playback stopped because `frame` could not be advanced.
    fn fail(&mut self, frame: &Frame, error: &PlaybackError);
}

/// Publishes the latest frame on a watch channel for pollers.
pub struct WatchSink {
    tx: watch::Sender<Frame>,
}

impl WatchSink {
    pub fn new(initial: Frame) -> (Self, watch::Receiver<Frame>) {
        let (tx, rx) = watch::channel(initial);
        (Self { tx }, rx)
    }
}

impl RenderSink for WatchSink {
    fn render(&mut self, frame: &Frame) {
        self.tx.send_replace(frame.clone());
    }

    fn fail(&mut self, frame: &Frame, error: &PlaybackError) {
        let mut frame = frame.clone();
        frame.error = Some(error.to_string());
        self.tx.send_replace(frame);
    }
}

/// Logs every frame's stats line.
pub struct TracingSink;

impl RenderSink for TracingSink {
    fn render(&mut self, frame: &Frame) {
        let d = &frame.display;
        tracing::debug!(
            "{} seg {} lat {} lng {} ts {} speed {} elapsed {}",
            frame.status.as_str(),
            frame.segment_index,
            d.latitude,
            d.longitude,
            d.timestamp,
            d.speed,
            d.elapsed
        );
    }

    fn fail(&mut self, frame: &Frame, error: &PlaybackError) {
        tracing::warn!("Frame on segment {} failed: {}", frame.segment_index, error);
    }
}

impl<A: RenderSink, B: RenderSink> RenderSink for (A, B) {
    fn render(&mut self, frame: &Frame) {
        self.0.render(frame);
        self.1.render(frame);
    }

    fn fail(&mut self, frame: &Frame, error: &PlaybackError) {
        self.0.fail(frame, error);
        self.1.fail(frame, error);
    }
}

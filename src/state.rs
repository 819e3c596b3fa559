use std::sync::Arc;

use tokio::sync::watch;

use crate::config::Config;
use crate::error::PlaybackError;
use crate::playback::controller::PlaybackController;
use crate::playback::session::{self, SessionHandle};
use crate::playback::sink::{TracingSink, WatchSink};
use crate::types::frame::Frame;
use crate::types::route::Route;

#[derive(Clone)]
pub struct AppState {
    route: Arc<Route>,
    session: SessionHandle,
    frames: watch::Receiver<Frame>,
}

impl AppState {
    /// Starts the playback session for `route`. Must be called inside a tokio runtime.
    pub fn new(config: &Config, route: Route) -> Result<Self, PlaybackError> {
        let route = Arc::new(route);
        let controller = PlaybackController::new(
            route.clone(),
            config.default_speed,
            config.reanchor_policy,
        )?;
        let (sink, frames) = WatchSink::new(controller.current_frame().clone());
        let (session, _task) =
            session::spawn(controller, (sink, TracingSink), config.frame_interval);

        Ok(Self {
            route,
            session,
            frames,
        })
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn latest_frame(&self) -> Frame {
        self.frames.borrow().clone()
    }
}

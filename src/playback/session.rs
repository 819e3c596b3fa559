use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::{PlaybackError, SessionError};
use crate::playback::controller::PlaybackController;
use crate::playback::sink::RenderSink;
use crate::types::frame::Frame;

const COMMAND_BUFFER: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Toggle,
    Reset,
    SetSpeed(f64),
}

struct Request {
    command: Command,
    reply: oneshot::Sender<Result<Frame, PlaybackError>>,
}

/// Cloneable front door to a running playback session.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Request>,
}

impl SessionHandle {
    /// Applies `command` and returns the frame it produced.
    pub async fn send(&self, command: Command) -> Result<Frame, SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Request { command, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        let frame = response.await.map_err(|_| SessionError::Closed)??;
        Ok(frame)
    }

    pub async fn play(&self) -> Result<Frame, SessionError> {
        self.send(Command::Play).await
    }

    pub async fn pause(&self) -> Result<Frame, SessionError> {
        self.send(Command::Pause).await
    }

    pub async fn toggle(&self) -> Result<Frame, SessionError> {
        self.send(Command::Toggle).await
    }

    pub async fn reset(&self) -> Result<Frame, SessionError> {
        self.send(Command::Reset).await
    }

    pub async fn set_speed(&self, multiplier: f64) -> Result<Frame, SessionError> {
        self.send(Command::SetSpeed(multiplier)).await
    }
}

/// Spawns the frame loop. The task owns the controller; commands and ticks
/// are handled one at a time, so once a pause or reset has been answered no
/// further tick can move the vehicle. The task ends when every handle is dropped.
pub fn spawn<S>(
    controller: PlaybackController,
    sink: S,
    frame_interval: Duration,
) -> (SessionHandle, JoinHandle<()>)
where
    S: RenderSink + 'static,
{
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let task = tokio::spawn(run(controller, sink, rx, frame_interval));
    (SessionHandle { commands: tx }, task)
}

async fn run<S: RenderSink>(
    mut controller: PlaybackController,
    mut sink: S,
    mut commands: mpsc::Receiver<Request>,
    frame_interval: Duration,
) {
    let epoch = Instant::now();
    let now_ms = || epoch.elapsed().as_secs_f64() * 1000.0;

    let mut ticker = time::interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    sink.render(controller.current_frame());

    loop {
        tokio::select! {
            request = commands.recv() => {
                let Some(Request { command, reply }) = request else {
                    break;
                };
                let was_playing = controller.is_playing();
                let result = apply(&mut controller, command, now_ms());
                if let Ok(frame) = &result {
                    sink.render(frame);
                }
                if controller.is_playing() && !was_playing {
                    ticker.reset();
                }
                let _ = reply.send(result);
            }
            _ = ticker.tick(), if controller.is_playing() => {
                match controller.tick(now_ms()) {
                    Ok(Some(frame)) => sink.render(&frame),
                    Ok(None) => {}
                    Err(err) => {
                        tracing::warn!("Playback stopped: {}", err);
                        sink.fail(controller.current_frame(), &err);
                    }
                }
            }
        }
    }

    tracing::debug!("Playback session closed");
}

fn apply(
    controller: &mut PlaybackController,
    command: Command,
    now: f64,
) -> Result<Frame, PlaybackError> {
    match command {
        Command::Play => Ok(controller.play(now)),
        Command::Pause => Ok(controller.pause(now)),
        Command::Toggle => Ok(controller.toggle(now)),
        Command::Reset => Ok(controller.reset()),
        Command::SetSpeed(multiplier) => controller.set_speed(multiplier, now),
    }
}

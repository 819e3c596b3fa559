use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::playback::session::Command;
use crate::state::AppState;
use crate::types::frame::Frame;

const MAX_SPEED_MULTIPLIER: f64 = 64.0;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/playback", get(current_frame))
        .route("/api/playback/play", post(play))
        .route("/api/playback/pause", post(pause))
        .route("/api/playback/toggle", post(toggle))
        .route("/api/playback/reset", post(reset))
        .route("/api/playback/speed", put(set_speed))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SpeedRequest {
    multiplier: f64,
}

async fn current_frame(State(state): State<AppState>) -> Json<Frame> {
    Json(state.latest_frame())
}

async fn play(State(state): State<AppState>) -> Result<Json<Frame>, AppError> {
    control(&state, Command::Play).await
}

async fn pause(State(state): State<AppState>) -> Result<Json<Frame>, AppError> {
    control(&state, Command::Pause).await
}

async fn toggle(State(state): State<AppState>) -> Result<Json<Frame>, AppError> {
    control(&state, Command::Toggle).await
}

async fn reset(State(state): State<AppState>) -> Result<Json<Frame>, AppError> {
    control(&state, Command::Reset).await
}

async fn set_speed(
    State(state): State<AppState>,
    Json(request): Json<SpeedRequest>,
) -> Result<Json<Frame>, AppError> {
    if request.multiplier > MAX_SPEED_MULTIPLIER {
        return Err(AppError::BadRequest(format!(
            "Speed multiplier {} exceeds the maximum of {}",
            request.multiplier, MAX_SPEED_MULTIPLIER
        )));
    }
    control(&state, Command::SetSpeed(request.multiplier)).await
}

async fn control(state: &AppState, command: Command) -> Result<Json<Frame>, AppError> {
    let frame = state.session().send(command).await?;
    tracing::info!(
        "Playback {:?} -> {} (segment {}, {}x)",
        command,
        frame.status.as_str(),
        frame.segment_index,
        frame.speed_multiplier
    );
    Ok(Json(frame))
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read route file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to fetch route from {url}: {message}")]
    Http { url: String, message: String },
    #[error("Invalid route JSON: {0}")]
    InvalidJson(String),
    #[error("Invalid GPX: {0}")]
    InvalidGpx(String),
    #[error(transparent)]
    Route(#[from] RouteError),
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Insufficient route points (need at least 2, got {0})")]
    InsufficientPoints(usize),
    #[error("Invalid coordinate at point {index}: ({lat}, {lng})")]
    InvalidCoordinate { index: usize, lat: f64, lng: f64 },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaybackError {
    #[error("Invalid speed multiplier: {0} (must be finite and > 0)")]
    InvalidSpeed(f64),
    #[error("Non-finite position computed on segment {segment}")]
    NonFinitePosition { segment: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Playback session is no longer running")]
    Closed,
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Session(SessionError::Playback(_)) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Session(SessionError::Closed) => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

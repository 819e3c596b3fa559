use std::fmt;
use std::path::PathBuf;

use crate::error::LoadError;
use crate::pipeline::parse;
use crate::types::route::{FileFormat, Route};

/// Where the route comes from. Read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSource {
    File(PathBuf),
    Url(String),
}

impl RouteSource {
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            RouteSource::Url(value.to_string())
        } else {
            RouteSource::File(PathBuf::from(value))
        }
    }

    pub fn format(&self) -> FileFormat {
        match self {
            RouteSource::File(path) => FileFormat::from_filename(&path.to_string_lossy()),
            RouteSource::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                FileFormat::from_filename(path)
            }
        }
    }
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSource::File(path) => write!(f, "{}", path.display()),
            RouteSource::Url(url) => f.write_str(url),
        }
    }
}

/// Fetches, parses and validates the route. No retry.
pub async fn load(source: &RouteSource) -> Result<Route, LoadError> {
    let bytes = match source {
        RouteSource::File(path) => tokio::fs::read(path).await.map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            source: e,
        })?,
        RouteSource::Url(url) => fetch(url).await?,
    };

    let format = source.format();
    tracing::debug!("Parsing {} bytes from {} as {:?}", bytes.len(), source, format);

    let route = load_bytes(&bytes, format)?;

    tracing::info!(
        "Loaded route from {} ({} points, {:.0} m, {:.1} s at 1x)",
        source,
        route.len(),
        route.total_distance_m(),
        route.total_duration_ms() / 1000.0
    );

    Ok(route)
}

pub fn load_bytes(bytes: &[u8], format: FileFormat) -> Result<Route, LoadError> {
    let points = parse::parse(bytes, format)?;
    Ok(Route::new(points)?)
}

async fn fetch(url: &str) -> Result<Vec<u8>, LoadError> {
    let http_error = |e: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        message: e.to_string(),
    };

    let response = reqwest::get(url)
        .await
        .map_err(http_error)?
        .error_for_status()
        .map_err(http_error)?;

    let bytes = response.bytes().await.map_err(http_error)?;
    Ok(bytes.to_vec())
}

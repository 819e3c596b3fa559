use serde::{Deserialize, Serialize};

use crate::error::RouteError;
use crate::geo;
use crate::types::frame::LatLng;

/// Synthetic duration of a segment whose endpoints lack timestamps (1 s at 1x).
pub const DEFAULT_SEGMENT_MS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
    /// Epoch milliseconds.
    pub timestamp: Option<i64>,
}

impl Point {
    pub fn lat_lng(&self) -> LatLng {
        LatLng {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Ordered, read-only sequence of at least two points.
#[derive(Debug, Clone)]
pub struct Route {
    points: Vec<Point>,
}

impl Route {
    pub fn new(points: Vec<Point>) -> Result<Self, RouteError> {
        if points.len() < 2 {
            return Err(RouteError::InsufficientPoints(points.len()));
        }

        for (index, p) in points.iter().enumerate() {
            let valid = p.lat.is_finite()
                && p.lng.is_finite()
                && (-90.0..=90.0).contains(&p.lat)
                && (-180.0..=180.0).contains(&p.lng);
            if !valid {
                return Err(RouteError::InvalidCoordinate {
                    index,
                    lat: p.lat,
                    lng: p.lng,
                });
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &Point {
        &self.points[0]
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Duration of segment `index` at 1x, floored to 1 ms when both ends are timestamped.
    pub fn segment_duration_ms(&self, index: usize) -> f64 {
        let a = &self.points[index];
        let b = &self.points[index + 1];
        match (a.timestamp, b.timestamp) {
            (Some(ta), Some(tb)) => (tb - ta).max(1) as f64,
            _ => DEFAULT_SEGMENT_MS,
        }
    }

    pub fn total_duration_ms(&self) -> f64 {
        (0..self.segment_count())
            .map(|i| self.segment_duration_ms(i))
            .sum()
    }

    pub fn total_distance_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| geo::distance_meters(pair[0].lat_lng(), pair[1].lat_lng()))
            .sum()
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds {
            min_lat: f64::INFINITY,
            min_lng: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            max_lng: f64::NEG_INFINITY,
        };
        for p in &self.points {
            bounds.min_lat = bounds.min_lat.min(p.lat);
            bounds.min_lng = bounds.min_lng.min(p.lng);
            bounds.max_lat = bounds.max_lat.max(p.lat);
            bounds.max_lng = bounds.max_lng.max(p.lng);
        }
        bounds
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            points: self.points.clone(),
            bounds: self.bounds(),
            distance_m: self.total_distance_m(),
            duration_ms: self.total_duration_ms(),
            has_timestamps: self.points.iter().all(|p| p.timestamp.is_some()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    pub points: Vec<Point>,
    pub bounds: Bounds,
    pub distance_m: f64,
    /// Playback duration at 1x.
    pub duration_ms: f64,
    pub has_timestamps: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    Json,
    Gpx,
}

impl FileFormat {
    /// Anything that is not `.gpx` is read as the JSON record list.
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename
            .rsplit('/')
            .next()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase());
        match ext.as_deref() {
            Some("gpx") => FileFormat::Gpx,
            _ => FileFormat::Json,
        }
    }
}

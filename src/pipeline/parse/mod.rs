mod gpx;
mod json;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::LoadError;
use crate::types::route::{FileFormat, Point};

pub trait Parser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<Point>, LoadError>;
}

pub fn parse(bytes: &[u8], format: FileFormat) -> Result<Vec<Point>, LoadError> {
    match format {
        FileFormat::Json => json::JsonParser.parse(bytes),
        FileFormat::Gpx => gpx::GpxParser.parse(bytes),
    }
}

/// ISO-8601 to epoch milliseconds. Zone-less date-times are read as UTC.
pub fn parse_timestamp(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc().timestamp_millis());
    }

    tracing::warn!("Ignoring unparseable timestamp {:?}", text);
    None
}

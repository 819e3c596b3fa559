use serde::Deserialize;

use crate::error::LoadError;
use crate::pipeline::parse::{parse_timestamp, Parser};
use crate::types::route::Point;

pub struct JsonParser;

#[derive(Deserialize)]
struct RawRecord {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    timestamp: Option<String>,
}

impl Parser for JsonParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<Point>, LoadError> {
        let records: Vec<RawRecord> =
            serde_json::from_slice(bytes).map_err(|e| LoadError::InvalidJson(e.to_string()))?;

        Ok(records
            .into_iter()
            .map(|record| Point {
                lat: record.latitude,
                lng: record.longitude,
                timestamp: record.timestamp.as_deref().and_then(parse_timestamp),
            })
            .collect())
    }
}

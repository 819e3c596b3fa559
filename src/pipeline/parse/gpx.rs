use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::LoadError;
use crate::pipeline::parse::{parse_timestamp, Parser};
use crate::types::route::Point;

pub struct GpxParser;

impl Parser for GpxParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<Point>, LoadError> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(true);

        let mut points = Vec::new();
        let mut current_point: Option<Point> = None;
        let mut in_time = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = e.name();
                    let name_str = std::str::from_utf8(name.as_ref())
                        .map_err(|e| LoadError::InvalidGpx(e.to_string()))?;

                    if name_str == "trkpt" || name_str == "rtept" {
                        current_point = Some(point_from_attributes(&e)?);
                    } else if name_str == "time" && current_point.is_some() {
                        in_time = true;
                    }
                }
                Ok(Event::Empty(e)) => {
                    let name = e.name();
                    if matches!(name.as_ref(), b"trkpt" | b"rtept") {
                        points.push(point_from_attributes(&e)?);
                    }
                }
                Ok(Event::Text(e)) => {
                    if in_time {
                        if let Some(point) = current_point.as_mut() {
                            let text = e
                                .unescape()
                                .map_err(|e| LoadError::InvalidGpx(e.to_string()))?;
                            point.timestamp = parse_timestamp(&text);
                        }
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"trkpt" | b"rtept" => {
                        if let Some(point) = current_point.take() {
                            points.push(point);
                        }
                    }
                    b"time" => in_time = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(LoadError::InvalidGpx(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(points)
    }
}

fn point_from_attributes(e: &quick_xml::events::BytesStart) -> Result<Point, LoadError> {
    let mut lat = None;
    let mut lng = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|e| LoadError::InvalidGpx(e.to_string()))?;
        let value = std::str::from_utf8(&attr.value)
            .map_err(|e| LoadError::InvalidGpx(e.to_string()))?;

        match attr.key.as_ref() {
            b"lat" => lat = value.trim().parse::<f64>().ok(),
            b"lon" => lng = value.trim().parse::<f64>().ok(),
            _ => {}
        }
    }

    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Point {
            lat,
            lng,
            timestamp: None,
        }),
        _ => Err(LoadError::InvalidGpx(
            "track point without numeric lat/lon".to_string(),
        )),
    }
}

use route_replay::pipeline::format::{
    format_coordinate, format_elapsed, format_speed, format_timestamp, stats_display,
};
use route_replay::types::frame::{LatLng, Sample};

#[test]
fn elapsed_is_minutes_and_seconds() {
    assert_eq!(format_elapsed(0.0), "00:00");
    assert_eq!(format_elapsed(999.0), "00:00");
    assert_eq!(format_elapsed(61_500.0), "01:01");
    assert_eq!(format_elapsed(3_599_000.0), "59:59");
    assert_eq!(format_elapsed(6_000_000.0), "100:00");
}

#[test]
fn elapsed_falls_back_for_negative_and_nan() {
    assert_eq!(format_elapsed(-1_000.0), "00:00");
    assert_eq!(format_elapsed(f64::NAN), "00:00");
}

#[test]
fn speed_has_one_decimal_or_placeholder() {
    assert_eq!(format_speed(Some(12.345)), "12.3 m/s");
    assert_eq!(format_speed(Some(0.0)), "0.0 m/s");
    assert_eq!(format_speed(None), "–");
    assert_eq!(format_speed(Some(f64::INFINITY)), "–");
}

#[test]
fn coordinates_have_six_decimals() {
    assert_eq!(format_coordinate(17.3850441234), "17.385044");
    assert_eq!(format_coordinate(-0.5), "-0.500000");
}

#[test]
fn timestamp_is_utc_or_placeholder() {
    assert_eq!(format_timestamp(Some(1_721_469_600_000)), "2024-07-20 10:00:00 UTC");
    assert_eq!(format_timestamp(None), "–");
}

#[test]
fn stats_display_formats_every_field() {
    let sample = Sample {
        position: LatLng {
            lat: 52.52,
            lng: 13.405,
        },
        timestamp: None,
        speed_mps: Some(4.26),
        elapsed_ms: 125_000.0,
    };
    let display = stats_display(&sample);
    assert_eq!(display.latitude, "52.520000");
    assert_eq!(display.longitude, "13.405000");
    assert_eq!(display.timestamp, "–");
    assert_eq!(display.speed, "4.3 m/s");
    assert_eq!(display.elapsed, "02:05");
}

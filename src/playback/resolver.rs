use crate::geo;
use crate::types::frame::Sample;
use crate::types::route::Route;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub sample: Sample,
    pub segment_index: usize,
    /// Fraction along the active segment, in [0, 1].
    pub segment_t: f64,
    pub is_at_end: bool,
}

/// Finds where the vehicle is after `elapsed_ms` of virtual time.
///
/// Segments are walked in order; the first one whose end lies at or after
/// `elapsed_ms` is active. Past the total duration the last segment is
/// reported with `segment_t == 1` and `is_at_end` set.
pub fn resolve(route: &Route, elapsed_ms: f64) -> Resolution {
    let elapsed_ms = if elapsed_ms.is_nan() {
        0.0
    } else {
        elapsed_ms.max(0.0)
    };

    let last = route.segment_count() - 1;
    let mut accumulated_ms = 0.0;
    let mut active = None;

    for i in 0..route.segment_count() {
        let seg_ms = route.segment_duration_ms(i);
        if elapsed_ms <= accumulated_ms + seg_ms {
            active = Some((i, (elapsed_ms - accumulated_ms) / seg_ms));
            break;
        }
        if i < last {
            accumulated_ms += seg_ms;
        }
    }

    let (segment_index, segment_t, is_at_end) = match active {
        Some((i, t)) => (i, t.clamp(0.0, 1.0), false),
        None => (last, 1.0, true),
    };

    Resolution {
        sample: sample_at(route, segment_index, segment_t, accumulated_ms),
        segment_index,
        segment_t,
        is_at_end,
    }
}

fn sample_at(route: &Route, index: usize, t: f64, accumulated_ms: f64) -> Sample {
    let points = route.points();
    let start = &points[index];
    let end = &points[index + 1];
    let seg_ms = route.segment_duration_ms(index);

    let position = geo::interpolate(start.lat_lng(), end.lat_lng(), t);
    let speed_mps = geo::distance_meters(start.lat_lng(), end.lat_lng()) / (seg_ms / 1000.0);

    let elapsed_ms = match (start.timestamp, route.first().timestamp) {
        (Some(ts), Some(base)) => (ts - base) as f64 + t * seg_ms,
        _ => accumulated_ms + t * seg_ms,
    };

    let timestamp = match (start.timestamp, end.timestamp) {
        (Some(ts), Some(te)) => Some((ts + (t * seg_ms).round() as i64).min(te.max(ts))),
        _ => None,
    };

    Sample {
        position,
        timestamp,
        speed_mps: speed_mps.is_finite().then_some(speed_mps),
        elapsed_ms,
    }
}

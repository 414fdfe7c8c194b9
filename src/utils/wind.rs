//! Wind direction helpers.

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const SECTOR_DEGREES: f64 = 360.0 / COMPASS_POINTS.len() as f64;

/// Map a meteorological wind direction to a 16-point compass label.
///
/// Any real angle is accepted: values are wrapped into `[0, 360)` first, so
/// 360° reads as "N" and -90° as "W". Non-finite input reads as "N".
pub fn compass_label(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return COMPASS_POINTS[0];
    }

    let normalized = degrees.rem_euclid(360.0);
    let sector = (normalized / SECTOR_DEGREES).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}

//! Formatting helpers for dashboard display values.

use crate::{models::Units, utils::wind::compass_label};
use chrono::DateTime;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Rounded temperature with its unit, e.g. "18°C"
pub fn temperature(value: f64, units: Units) -> String {
    // `+ 0.0` turns a rounded -0 into 0
    format!("{}{}", value.round() + 0.0, units.temperature_label())
}

/// Wind speed with one decimal and compass direction, e.g. "3.6 m/s NE"
pub fn wind(speed: f64, degrees: f64, units: Units) -> String {
    format!(
        "{:.1} {} {}",
        speed,
        units.speed_label(),
        compass_label(degrees)
    )
}

/// Visibility in kilometres from metres
pub fn visibility(metres: Option<u32>) -> String {
    match metres {
        Some(m) => format!("{:.1} km", f64::from(m) / 1000.0),
        None => "n/a".to_string(),
    }
}

/// Probability of precipitation (0.0-1.0) as a whole percentage
pub fn precipitation_chance(pop: f64) -> String {
    format!("{}%", (pop.clamp(0.0, 1.0) * 100.0).round())
}

/// Local wall-clock time for a unix timestamp and a UTC offset in seconds
pub fn local_time(timestamp: i64, utc_offset_seconds: i64) -> String {
    DateTime::from_timestamp(timestamp.saturating_add(utc_offset_seconds), 0)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Icon image URL for a condition icon code such as "10d"
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@2x.png")
}

/// Sentence-case a backend description ("light rain" -> "Light rain")
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

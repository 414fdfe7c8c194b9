//! Environment configuration for the upstream HTTP clients.
//!
//! The forecast backend is slower than the geocoder, so it gets the more
//! generous default timeout.

use crate::services::http_client::HttpClientConfig;
use std::env;

pub const DEFAULT_FORECAST_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_FORECAST_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_GEOCODE_API_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_GEOCODE_TIMEOUT_MS: u64 = 10_000;

/// Identifying client agent; Nominatim's usage policy requires one
pub fn default_user_agent() -> String {
    format!("WeatherDashboard/{}", env!("CARGO_PKG_VERSION"))
}

fn detailed_logging_from_env() -> bool {
    env::var("HTTP_CLIENT_DETAILED_LOGGING")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(true)
}

fn timeout_from_env(key: &str, default_ms: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|ms: &u64| *ms > 0)
        .unwrap_or(default_ms)
}

impl HttpClientConfig {
    /// Forecast backend settings from `FORECAST_API_URL` and
    /// `FORECAST_API_TIMEOUT_MS`
    pub fn forecast_from_env() -> Self {
        let base_url =
            env::var("FORECAST_API_URL").unwrap_or_else(|_| DEFAULT_FORECAST_API_URL.to_string());
        let timeout_ms = timeout_from_env("FORECAST_API_TIMEOUT_MS", DEFAULT_FORECAST_TIMEOUT_MS);

        Self {
            enable_detailed_logging: detailed_logging_from_env(),
            ..Self::new(base_url, timeout_ms).with_header("Accept", "application/json")
        }
    }

    /// Reverse geocoder settings from `GEOCODE_API_URL`,
    /// `GEOCODE_API_TIMEOUT_MS` and `GEOCODE_USER_AGENT`
    pub fn geocode_from_env() -> Self {
        let base_url =
            env::var("GEOCODE_API_URL").unwrap_or_else(|_| DEFAULT_GEOCODE_API_URL.to_string());
        let timeout_ms = timeout_from_env("GEOCODE_API_TIMEOUT_MS", DEFAULT_GEOCODE_TIMEOUT_MS);
        let user_agent = env::var("GEOCODE_USER_AGENT").unwrap_or_else(|_| default_user_agent());

        Self {
            enable_detailed_logging: detailed_logging_from_env(),
            ..Self::new(base_url, timeout_ms).with_header("User-Agent", user_agent)
        }
    }
}

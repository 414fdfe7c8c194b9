//! Server bind address and dashboard defaults.

use crate::models::Units;
use std::env;

/// Where the HTTP server listens and which unit system the dashboard starts in
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub default_units: Units,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            default_units: Units::Metric,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `SERVER_HOST`, `SERVER_PORT` and `DEFAULT_UNITS`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("SERVER_HOST").unwrap_or(defaults.host);
        let port = env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);
        let default_units = env::var("DEFAULT_UNITS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.default_units);

        Self {
            host,
            port,
            default_units,
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

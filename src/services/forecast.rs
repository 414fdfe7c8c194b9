//! Forecast acquisition from the backend weather API.
//!
//! Two paths: by city name (one backend call) and by coordinates (backend
//! call plus a concurrent reverse-geocoding lookup whose place name, when
//! available, replaces the backend's).

use crate::{
    models::{Coordinates, Forecast, Locator, Units},
    services::{
        geocode::GeocodeClient,
        http_client::{ApiClient, ClientError, HttpClientConfig},
        metrics::ClientMetrics,
    },
};
use serde_json::Value;
use tracing::{debug, warn};

const CITY_PATH: &str = "forecast/city";
const COORDINATES_PATH: &str = "forecast/coordinates";

const CONNECTION_MESSAGE: &str =
    "Unable to reach the weather service. Please check your connection and try again.";
const GENERIC_MESSAGE: &str = "Failed to fetch weather data. Please try again.";

/// Readable message from a backend error body. `detail`, `message` and
/// `error` are tried in order; `detail` may also be a list of validation
/// errors, whose `msg` entries are joined.
fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    ["detail", "message", "error"]
        .into_iter()
        .filter_map(|key| value.get(key))
        .filter_map(|field| match field {
            Value::String(text) => Some(text.trim().to_string()),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .map(str::trim)
                    .filter(|msg| !msg.is_empty())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        })
        .find(|message| !message.is_empty())
}

/// Forecast fetch failures, split the way the dashboard presents them
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    /// The backend could not be reached or did not answer in time
    #[error("Weather service unreachable: {0}")]
    Connection(String),

    /// The backend answered with an error carrying a readable message
    #[error("Weather service error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// The backend answered with an error status but no readable message
    #[error("Weather service returned status {0}")]
    Status(u16),

    /// Anything else, e.g. an undecodable body
    #[error("Unexpected weather service failure: {0}")]
    Unexpected(String),
}

impl ForecastError {
    /// Message suitable for showing to the end user
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::Connection(_) => CONNECTION_MESSAGE.to_string(),
            ForecastError::Backend { message, .. } => message.clone(),
            ForecastError::Status(_) | ForecastError::Unexpected(_) => GENERIC_MESSAGE.to_string(),
        }
    }
}

impl From<ClientError> for ForecastError {
    fn from(err: ClientError) -> Self {
        if err.is_connection_failure() {
            return ForecastError::Connection(err.to_string());
        }

        match err {
            ClientError::Status { status, body } => match backend_message(&body) {
                Some(message) => ForecastError::Backend { status, message },
                None => ForecastError::Status(status),
            },
            other => ForecastError::Unexpected(other.to_string()),
        }
    }
}

/// Anything that can produce forecasts for the dashboard. Futures are not
/// required to be `Send`: actix handlers and the tests drive them on the
/// current thread.
#[allow(async_fn_in_trait)]
pub trait ForecastSource {
    async fn forecast_by_city(&self, city: &str, units: Units) -> Result<Forecast, ForecastError>;

    async fn forecast_by_coordinates(
        &self,
        coords: Coordinates,
        units: Units,
    ) -> Result<Forecast, ForecastError>;

    /// Dispatch on the locator kind
    async fn forecast_for(&self, locator: &Locator, units: Units) -> Result<Forecast, ForecastError> {
        match locator {
            Locator::City(city) => self.forecast_by_city(city, units).await,
            Locator::Coordinates(coords) => self.forecast_by_coordinates(*coords, units).await,
        }
    }
}

/// Client for the backend forecast API, enriched by reverse geocoding
#[derive(Clone)]
pub struct ForecastClient {
    api: ApiClient,
    geocoder: GeocodeClient,
}

impl ForecastClient {
    pub fn new(
        config: HttpClientConfig,
        geocoder: GeocodeClient,
        metrics: Option<ClientMetrics>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            api: ApiClient::new(config, metrics)?,
            geocoder,
        })
    }

    /// Build both clients from the environment
    pub fn from_env(metrics: Option<ClientMetrics>) -> Result<Self, ClientError> {
        let geocoder = GeocodeClient::new(HttpClientConfig::geocode_from_env(), metrics.clone())?;
        Self::new(HttpClientConfig::forecast_from_env(), geocoder, metrics)
    }

    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Forecast, ForecastError> {
        let forecast: Forecast = self.api.get_json(path, query).await?;

        for day in forecast
            .daily_forecasts
            .iter()
            .filter(|day| !day.is_consistent())
        {
            warn!(
                date = %day.date,
                min_temp = day.min_temp,
                max_temp = day.max_temp,
                "Backend returned a day whose samples disagree with its aggregates"
            );
        }

        Ok(forecast)
    }
}

impl ForecastSource for ForecastClient {
    /// Forecast for a city name. The caller rejects blank names.
    async fn forecast_by_city(&self, city: &str, units: Units) -> Result<Forecast, ForecastError> {
        let query = [("city", city.to_string()), ("units", units.to_string())];
        self.fetch(CITY_PATH, &query).await
    }

    /// Forecast for coordinates. Geocoding runs alongside the backend call and
    /// only ever improves the place name; the backend call alone decides
    /// success. `city_info` carries the requested coordinates.
    async fn forecast_by_coordinates(
        &self,
        coords: Coordinates,
        units: Units,
    ) -> Result<Forecast, ForecastError> {
        let query = [
            ("lat", coords.lat.to_string()),
            ("lon", coords.lon.to_string()),
            ("units", units.to_string()),
        ];

        let (outcome, forecast) = tokio::join!(
            self.geocoder.resolve_place(coords),
            self.fetch(COORDINATES_PATH, &query)
        );
        // Place coordinates are the query's, whatever precision the backend echoes
        let forecast = forecast?.at_coordinates(coords);

        Ok(match outcome.into_place() {
            Some(place) => {
                debug!(
                    backend_name = %forecast.city_info.name,
                    geocoded_name = %place.name,
                    "Replacing backend place name with geocoded name"
                );
                forecast.with_place_names(&place)
            }
            None => forecast,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn status(status: u16, body: &str) -> ClientError {
        ClientError::Status {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_backend_message_is_extracted() {
        let err = ForecastError::from(status(404, r#"{"detail": "City 'Atlantis' not found"}"#));
        assert_eq!(
            err,
            ForecastError::Backend {
                status: 404,
                message: "City 'Atlantis' not found".to_string()
            }
        );
        assert_eq!(err.user_message(), "City 'Atlantis' not found");
    }

    #[test]
    fn test_alternate_message_fields() {
        let err = ForecastError::from(status(500, r#"{"message": "", "error": "Upstream quota exceeded"}"#));
        assert_eq!(err.user_message(), "Upstream quota exceeded");
    }

    #[test]
    fn test_status_without_message_keeps_status() {
        let err = ForecastError::from(status(502, "<html>Bad Gateway</html>"));
        assert_eq!(err, ForecastError::Status(502));
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn test_validation_error_list_is_joined() {
        let body = r#"{"detail": [
            {"loc": ["query", "units"], "msg": "value is not a valid enumeration member", "type": "type_error.enum"},
            {"loc": ["query", "lat"], "msg": "field required", "type": "value_error.missing"}
        ]}"#;
        let err = ForecastError::from(status(422, body));
        assert_eq!(
            err,
            ForecastError::Backend {
                status: 422,
                message: "value is not a valid enumeration member; field required".to_string()
            }
        );
    }

    #[test]
    fn test_non_string_detail_falls_through_to_message() {
        let body = r#"{"detail": [{"loc": ["query", "units"]}], "message": "Invalid units"}"#;
        assert_eq!(ForecastError::from(status(422, body)).user_message(), "Invalid units");

        let body = r#"{"detail": {"code": 7}, "error": "Upstream quota exceeded"}"#;
        assert_eq!(
            ForecastError::from(status(503, body)).user_message(),
            "Upstream quota exceeded"
        );
    }

    #[test]
    fn test_timeout_is_connection_failure() {
        let err = ForecastError::from(ClientError::Timeout(Duration::from_secs(20)));
        assert!(matches!(err, ForecastError::Connection(_)));
        assert_eq!(err.user_message(), CONNECTION_MESSAGE);
    }

    #[test]
    fn test_decode_error_is_unexpected() {
        let err = ForecastError::from(ClientError::Decode("missing field `city`".to_string()));
        assert!(matches!(err, ForecastError::Unexpected(_)));
    }
}

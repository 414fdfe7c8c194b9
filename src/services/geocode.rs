//! Reverse geocoding: convert coordinates to a human-readable place.
//!
//! Uses Nominatim (OpenStreetMap). A lookup never fails from the caller's
//! point of view: every problem is logged and reported as
//! [`GeocodeOutcome::Unavailable`], and the dashboard keeps the backend's own
//! place name.

use crate::{
    models::{Coordinates, PlaceDescriptor},
    services::{
        http_client::{ApiClient, ClientError, HttpClientConfig},
        metrics::ClientMetrics,
    },
};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

const REVERSE_PATH: &str = "reverse";
/// City/town level resolution
const ZOOM_LEVEL: u8 = 10;

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    #[serde(default, deserialize_with = "de_coordinate")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "de_coordinate")]
    lon: Option<f64>,
    address: Option<NominatimAddress>,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

/// Nominatim sends coordinates as strings ("47.6062"); accept numbers too.
fn de_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid coordinate '{s}'"))),
    }
}

/// Why a lookup produced no place
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeFailure {
    #[error("geocoder unreachable: {0}")]
    Transport(String),
    #[error("geocoder timed out")]
    Timeout,
    #[error("geocoder returned status {0}")]
    Status(u16),
    #[error("malformed geocoder response: {0}")]
    Malformed(String),
    #[error("no address found for coordinates")]
    NoAddress,
}

impl GeocodeFailure {
    /// Metric label
    pub fn reason(&self) -> &'static str {
        match self {
            GeocodeFailure::Transport(_) => "transport",
            GeocodeFailure::Timeout => "timeout",
            GeocodeFailure::Status(_) => "status",
            GeocodeFailure::Malformed(_) => "malformed",
            GeocodeFailure::NoAddress => "no_address",
        }
    }
}

impl From<ClientError> for GeocodeFailure {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Timeout(_) => GeocodeFailure::Timeout,
            ClientError::Network(e) if e.is_timeout() => GeocodeFailure::Timeout,
            ClientError::Network(e) => GeocodeFailure::Transport(e.to_string()),
            ClientError::Status { status, .. } => GeocodeFailure::Status(status),
            ClientError::Decode(msg) => GeocodeFailure::Malformed(msg),
            other @ (ClientError::InvalidUrl(_) | ClientError::InvalidHeader(_)) => {
                GeocodeFailure::Transport(other.to_string())
            }
        }
    }
}

/// Result of a reverse geocoding lookup
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Resolved(PlaceDescriptor),
    Unavailable(GeocodeFailure),
}

impl GeocodeOutcome {
    pub fn place(&self) -> Option<&PlaceDescriptor> {
        match self {
            GeocodeOutcome::Resolved(place) => Some(place),
            GeocodeOutcome::Unavailable(_) => None,
        }
    }

    pub fn into_place(self) -> Option<PlaceDescriptor> {
        match self {
            GeocodeOutcome::Resolved(place) => Some(place),
            GeocodeOutcome::Unavailable(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, GeocodeOutcome::Resolved(_))
    }
}

/// First non-empty of city, town, village, county; otherwise the placeholder
fn display_name(address: &NominatimAddress) -> String {
    [
        &address.city,
        &address.town,
        &address.village,
        &address.county,
    ]
    .into_iter()
    .flatten()
    .map(|name| name.trim())
    .find(|name| !name.is_empty())
    .unwrap_or(UNKNOWN_LOCATION)
    .to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reverse geocoding client
#[derive(Clone)]
pub struct GeocodeClient {
    api: ApiClient,
    metrics: Option<ClientMetrics>,
}

impl GeocodeClient {
    pub fn new(config: HttpClientConfig, metrics: Option<ClientMetrics>) -> Result<Self, ClientError> {
        Ok(Self {
            api: ApiClient::new(config, metrics.clone())?,
            metrics,
        })
    }

    /// Resolve coordinates to a place. Never returns an error: failures are
    /// logged and reported as [`GeocodeOutcome::Unavailable`].
    pub async fn resolve_place(&self, coords: Coordinates) -> GeocodeOutcome {
        match self.lookup(coords).await {
            Ok(place) => {
                info!(
                    lat = coords.lat,
                    lon = coords.lon,
                    place = %place.display_name(),
                    "Reverse geocoded coordinates"
                );
                GeocodeOutcome::Resolved(place)
            }
            Err(failure) => {
                warn!(
                    lat = coords.lat,
                    lon = coords.lon,
                    reason = failure.reason(),
                    error = %failure,
                    "Reverse geocoding unavailable, keeping backend place name"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_geocode_fallback(failure.reason());
                }
                GeocodeOutcome::Unavailable(failure)
            }
        }
    }

    async fn lookup(&self, coords: Coordinates) -> Result<PlaceDescriptor, GeocodeFailure> {
        let query = [
            ("lat", coords.lat.to_string()),
            ("lon", coords.lon.to_string()),
            ("format", "json".to_string()),
            ("zoom", ZOOM_LEVEL.to_string()),
            ("addressdetails", "1".to_string()),
        ];

        let body: NominatimResponse = self.api.get_json(REVERSE_PATH, &query).await?;
        Self::descriptor_from(body)
    }

    fn descriptor_from(body: NominatimResponse) -> Result<PlaceDescriptor, GeocodeFailure> {
        let Some(address) = body.address else {
            if let Some(message) = &body.error {
                debug!(message = %message, "Geocoder reported no result");
            }
            return Err(GeocodeFailure::NoAddress);
        };

        // Coordinates come from the response: the geocoder may snap to the
        // resolved place rather than echo the query.
        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(GeocodeFailure::Malformed(
                "response is missing lat/lon".to_string(),
            ));
        };

        let name = display_name(&address);
        Ok(PlaceDescriptor {
            name,
            country: non_empty(address.country).unwrap_or_default(),
            state: non_empty(address.state),
            lat,
            lon,
        })
    }
}

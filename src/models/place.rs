//! Coordinates, place descriptors and the locators used to request a forecast.

use serde::{Deserialize, Serialize};

/// Geographic coordinates in degrees. Not validated here; the remote services
/// reject values they cannot handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Human-facing name for a coordinate, as resolved by reverse geocoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDescriptor {
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl PlaceDescriptor {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }

    /// "Name, State, Country" with empty parts left out
    pub fn display_name(&self) -> String {
        [Some(self.name.as_str()), self.state.as_deref(), Some(self.country.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// How a forecast is requested: by city name or by coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Locator {
    City(String),
    Coordinates(Coordinates),
}

impl Locator {
    /// Best locator for a refetch. Coordinates win over a city name once known.
    pub fn preferred(coordinates: Option<Coordinates>, city: Option<&str>) -> Option<Self> {
        if let Some(coords) = coordinates.filter(Coordinates::is_finite) {
            return Some(Locator::Coordinates(coords));
        }

        city.map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Locator::City(name.to_string()))
    }

    /// Query pairs identifying this locator, shared by links and backend calls
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Locator::City(name) => vec![("city", name.clone())],
            Locator::Coordinates(coords) => {
                vec![("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())]
            }
        }
    }
}

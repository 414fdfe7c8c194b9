//! API request and response models.

use crate::models::{
    place::{Coordinates, Locator},
    units::Units,
};
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response model for the version information endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VersionResponse {
    pub version: String,
    pub commit: String,
    pub build_time: String,
}

/// Error body returned by the JSON endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Query parameters accepted by the forecast endpoint and the dashboard page
#[derive(Debug, Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct ForecastQuery {
    /// City name (e.g., "Paris")
    pub city: Option<String>,
    /// Latitude coordinate
    pub lat: Option<f64>,
    /// Longitude coordinate
    pub lon: Option<f64>,
    /// "metric" (default) or "imperial"
    pub units: Option<String>,
}

/// Reasons a forecast query is rejected before any upstream call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("City name cannot be empty")]
    EmptyCity,
    #[error("Both 'lat' and 'lon' parameters are required")]
    PartialCoordinates,
    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange,
    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange,
    #[error("{0}")]
    Units(String),
}

impl ForecastQuery {
    /// Requested unit system, metric when absent
    pub fn units(&self) -> Result<Units, QueryError> {
        self.units_or(Units::default())
    }

    /// Requested unit system, `default` when absent
    pub fn units_or(&self, default: Units) -> Result<Units, QueryError> {
        match self.units.as_deref() {
            None | Some("") => Ok(default),
            Some(raw) => raw
                .parse::<Units>()
                .map_err(|e| QueryError::Units(e.to_string())),
        }
    }

    /// Locator named by the query. A city takes precedence over coordinates;
    /// a blank city is ignored when both coordinates are present. `Ok(None)`
    /// means the query names no location at all.
    pub fn locator(&self) -> Result<Option<Locator>, QueryError> {
        let has_coordinates = self.lat.is_some() && self.lon.is_some();
        if let Some(city) = &self.city {
            let city = city.trim();
            if !city.is_empty() {
                return Ok(Some(Locator::City(city.to_string())));
            }
            if !has_coordinates {
                return Err(QueryError::EmptyCity);
            }
        }

        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(QueryError::LatitudeOutOfRange);
                }
                if !(-180.0..=180.0).contains(&lon) {
                    return Err(QueryError::LongitudeOutOfRange);
                }
                Ok(Some(Locator::Coordinates(Coordinates::new(lat, lon))))
            }
            (None, None) => Ok(None),
            _ => Err(QueryError::PartialCoordinates),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(city: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> ForecastQuery {
        ForecastQuery {
            city: city.map(str::to_string),
            lat,
            lon,
            units: None,
        }
    }

    #[test]
    fn test_city_locator_is_trimmed() {
        assert_eq!(
            query(Some("  Paris "), None, None).locator(),
            Ok(Some(Locator::City("Paris".to_string())))
        );
    }

    #[test]
    fn test_blank_city_is_rejected() {
        assert_eq!(query(Some("   "), None, None).locator(), Err(QueryError::EmptyCity));
    }

    #[test]
    fn test_blank_city_with_coordinates_uses_coordinates() {
        assert_eq!(
            query(Some(""), Some(48.85), Some(2.35)).locator(),
            Ok(Some(Locator::Coordinates(Coordinates::new(48.85, 2.35))))
        );
        assert_eq!(
            query(Some("  "), Some(48.85), None).locator(),
            Err(QueryError::EmptyCity)
        );
        assert_eq!(
            query(Some("Lyon"), Some(48.85), Some(2.35)).locator(),
            Ok(Some(Locator::City("Lyon".to_string())))
        );
    }

    #[test]
    fn test_coordinate_validation() {
        assert_eq!(
            query(None, Some(34.05), None).locator(),
            Err(QueryError::PartialCoordinates)
        );
        assert_eq!(
            query(None, Some(100.0), Some(0.0)).locator(),
            Err(QueryError::LatitudeOutOfRange)
        );
        assert_eq!(
            query(None, Some(0.0), Some(200.0)).locator(),
            Err(QueryError::LongitudeOutOfRange)
        );
        assert_eq!(query(None, None, None).locator(), Ok(None));
    }

    #[test]
    fn test_units_parsing() {
        let mut q = query(Some("Paris"), None, None);
        assert_eq!(q.units(), Ok(Units::Metric));
        q.units = Some("imperial".to_string());
        assert_eq!(q.units(), Ok(Units::Imperial));
        assert_eq!(q.units_or(Units::Metric), Ok(Units::Imperial));
        q.units = None;
        assert_eq!(q.units_or(Units::Imperial), Ok(Units::Imperial));
        q.units = Some("kelvin".to_string());
        assert!(matches!(q.units(), Err(QueryError::Units(_))));
    }
}

//! Forecast data returned by the backend weather API.
//!
//! These are value objects: the backend computes every field and this crate
//! passes them through unchanged. The one exception is `Forecast::city_info`,
//! whose naming fields can be replaced by a reverse-geocoded place.

use crate::models::place::{Coordinates, PlaceDescriptor};
use serde::{Deserialize, Serialize};

/// Coordinate pair as the backend spells it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// City metadata supplied by the forecast source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub id: i64,
    pub name: String,
    pub coord: Coord,
    pub country: String,
    #[serde(default)]
    pub population: u64,
    /// Offset from UTC in seconds
    #[serde(default)]
    pub timezone: i64,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Temperature, pressure and humidity readings for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sea_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grnd_level: Option<f64>,
    pub humidity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_kf: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    /// Cloud cover in percent
    pub all: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    /// Meteorological direction in degrees
    pub deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rain {
    #[serde(rename = "3h")]
    pub three_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartOfDay {
    #[serde(rename = "d")]
    Day,
    #[serde(rename = "n")]
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayPart {
    pub pod: PartOfDay,
}

/// A single time-stamped forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Unix timestamp (seconds)
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<WeatherCondition>,
    pub clouds: Clouds,
    pub wind: Wind,
    /// Visibility in metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<u32>,
    /// Probability of precipitation, 0.0 to 1.0
    pub pop: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<Rain>,
    pub sys: DayPart,
    pub dt_txt: String,
}

impl HourlyForecast {
    /// First listed condition; the backend always sends at least one
    pub fn primary_condition(&self) -> Option<&WeatherCondition> {
        self.weather.first()
    }
}

/// Representative condition for a whole day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// All samples for one calendar date plus their aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub day_name: String,
    pub avg_temp: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub weather: ConditionSummary,
    pub hourly_forecasts: Vec<HourlyForecast>,
}

impl DailyForecast {
    /// Samples are in ascending time order and every sample temperature lies
    /// within the day's min/max
    pub fn is_consistent(&self) -> bool {
        let ordered = self
            .hourly_forecasts
            .windows(2)
            .all(|pair| pair[0].dt <= pair[1].dt);
        let bounded = self
            .hourly_forecasts
            .iter()
            .all(|hour| self.min_temp <= hour.main.temp && hour.main.temp <= self.max_temp);

        ordered && bounded
    }
}

/// Complete forecast for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: CityRecord,
    pub daily_forecasts: Vec<DailyForecast>,
    pub city_info: PlaceDescriptor,
}

impl Forecast {
    /// Replace the place name, country and state with the geocoder's values.
    /// Latitude and longitude stay as the backend reported them.
    pub fn with_place_names(self, place: &PlaceDescriptor) -> Self {
        Self {
            city_info: PlaceDescriptor {
                name: place.name.clone(),
                country: place.country.clone(),
                state: place.state.clone(),
                ..self.city_info
            },
            ..self
        }
    }

    /// Pin the place coordinates to the ones that were requested
    pub fn at_coordinates(self, coords: Coordinates) -> Self {
        Self {
            city_info: PlaceDescriptor {
                lat: coords.lat,
                lon: coords.lon,
                ..self.city_info
            },
            ..self
        }
    }

    pub fn today(&self) -> Option<&DailyForecast> {
        self.daily_forecasts.first()
    }

    /// Sample used for "current conditions"
    pub fn current(&self) -> Option<&HourlyForecast> {
        self.today().and_then(|day| day.hourly_forecasts.first())
    }

    /// Coordinates of the place shown, if usable for a refetch
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(self.city_info.coordinates()).filter(Coordinates::is_finite)
    }
}

//! Dashboard session state: search, location, unit toggle and refetch.
//!
//! Requests are issued in two halves. Starting an action returns a
//! [`FetchRequest`] carrying a ticket; the caller runs it against a
//! [`ForecastSource`] and hands the result back to [`DashboardState::complete`].
//! Each new request supersedes the previous ones, so a slow response that
//! arrives after a newer request was issued is dropped instead of overwriting
//! newer state.

use crate::{
    models::{Coordinates, Forecast, Locator, Units},
    services::forecast::{ForecastError, ForecastSource},
};
use tracing::debug;

pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name";

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// A request the caller should execute
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub locator: Locator,
    pub units: Units,
}

impl FetchRequest {
    pub async fn execute<S: ForecastSource>(&self, source: &S) -> Result<Forecast, ForecastError> {
        source.forecast_for(&self.locator, self.units).await
    }
}

/// What happened to a completed response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request was issued; the response was discarded
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    units: Units,
    loading: bool,
    error: Option<String>,
    forecast: Option<Forecast>,
    last_city: Option<String>,
    last_coordinates: Option<Coordinates>,
    generation: u64,
}

impl DashboardState {
    pub fn new(units: Units) -> Self {
        Self {
            units,
            ..Default::default()
        }
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub fn last_city(&self) -> Option<&str> {
        self.last_city.as_deref()
    }

    pub fn last_coordinates(&self) -> Option<Coordinates> {
        self.last_coordinates
    }

    /// Search by city name. Blank input is rejected here, before any request.
    pub fn search_city(&mut self, input: &str) -> Result<FetchRequest, String> {
        let city = input.trim();
        if city.is_empty() {
            self.error = Some(EMPTY_CITY_MESSAGE.to_string());
            return Err(EMPTY_CITY_MESSAGE.to_string());
        }

        self.last_city = Some(city.to_string());
        // A new search replaces any earlier position
        self.last_coordinates = None;
        Ok(self.issue(Locator::City(city.to_string())))
    }

    /// Fetch for a position reported by the device
    pub fn use_location(&mut self, coords: Coordinates) -> FetchRequest {
        self.last_coordinates = Some(coords);
        self.issue(Locator::Coordinates(coords))
    }

    /// Flip metric/imperial and refetch the current location, if any
    pub fn toggle_units(&mut self) -> Option<FetchRequest> {
        self.units = self.units.toggled();
        self.refetch()
    }

    /// Refetch with the best known locator: coordinates of the last place
    /// shown, else the last searched city name
    pub fn refetch(&mut self) -> Option<FetchRequest> {
        let locator = Locator::preferred(self.last_coordinates, self.last_city.as_deref())?;
        Some(self.issue(locator))
    }

    /// Locator a refetch would use, without issuing anything
    pub fn refetch_locator(&self) -> Option<Locator> {
        Locator::preferred(self.last_coordinates, self.last_city.as_deref())
    }

    /// Show a message without issuing a request (e.g. invalid input)
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Apply a response unless a newer request has been issued since
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Forecast, ForecastError>,
    ) -> Completion {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale forecast response"
            );
            return Completion::Stale;
        }

        self.loading = false;
        match result {
            Ok(forecast) => {
                if let Some(coords) = forecast.coordinates() {
                    self.last_coordinates = Some(coords);
                }
                self.forecast = Some(forecast);
                self.error = None;
            }
            Err(err) => {
                self.forecast = None;
                self.error = Some(err.user_message());
            }
        }
        Completion::Applied
    }

    fn issue(&mut self, locator: Locator) -> FetchRequest {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        FetchRequest {
            ticket: FetchTicket {
                generation: self.generation,
            },
            locator,
            units: self.units,
        }
    }
}

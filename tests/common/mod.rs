//! Shared helpers for integration tests: upstream stubs and client wiring.

#![allow(dead_code)]

use serde_json::Value;
use std::time::Duration;
use weather_dashboard::{
    AppServices, ForecastClient, GeocodeClient, HttpClientConfig, Units,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PARIS_FIXTURE: &str = include_str!("../fixtures/forecast_paris.json");

pub const PARIS_LAT: &str = "48.8534";
pub const PARIS_LON: &str = "2.3488";

pub fn paris_fixture() -> Value {
    serde_json::from_str(PARIS_FIXTURE).expect("fixture is valid JSON")
}

pub fn geocoder(base_url: &str, timeout_ms: u64) -> GeocodeClient {
    let config = HttpClientConfig::new(base_url, timeout_ms)
        .with_header("User-Agent", "WeatherDashboardTests/1.0");
    GeocodeClient::new(config, None).expect("geocoder config is valid")
}

pub fn forecast_client(forecast_url: &str, geocode_url: &str) -> ForecastClient {
    let config = HttpClientConfig::new(forecast_url, 2_000).with_header("Accept", "application/json");
    ForecastClient::new(config, geocoder(geocode_url, 2_000), None)
        .expect("forecast config is valid")
}

pub fn services(forecast_url: &str, geocode_url: &str) -> AppServices {
    AppServices::new(forecast_client(forecast_url, geocode_url), Units::Metric)
}

/// Backend answering both forecast endpoints with the Paris fixture
pub async fn mount_paris_backend(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/forecast/city"))
        .and(query_param("city", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_fixture()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast/coordinates"))
        .and(query_param("lat", PARIS_LAT))
        .and(query_param("lon", PARIS_LON))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_fixture()))
        .mount(server)
        .await;
}

/// Nominatim-shaped answer for central Paris
pub fn nominatim_paris() -> Value {
    serde_json::json!({
        "place_id": 88066702,
        "lat": "48.8588897",
        "lon": "2.3200410",
        "display_name": "Paris, Île-de-France, France métropolitaine, France",
        "address": {
            "city": "Paris",
            "county": "Paris",
            "state": "Île-de-France",
            "country": "France",
            "country_code": "fr"
        }
    })
}

pub async fn mount_geocoder(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn slow(response: ResponseTemplate, delay_ms: u64) -> ResponseTemplate {
    response.set_delay(Duration::from_millis(delay_ms))
}

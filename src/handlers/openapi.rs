//! OpenAPI specification generation and app factory.

use crate::{
    config::{MetricsConfig, ServerConfig},
    handlers::{dashboard, forecast, get_metrics, health, version},
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    models::Units,
    services::{AppMetrics, ClientError, ClientMetrics, ForecastClient},
};
use actix_web::App;
use paperclip::actix::{web, OpenApiExt};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Shared services handed to every handler
#[derive(Clone)]
pub struct AppServices {
    pub forecast: ForecastClient,
    pub default_units: Units,
}

impl AppServices {
    pub fn new(client: ForecastClient, default_units: Units) -> Self {
        Self {
            forecast: client,
            default_units,
        }
    }

    /// Build the upstream clients and defaults from the environment
    pub fn from_env(metrics: Option<ClientMetrics>) -> Result<Self, ClientError> {
        Ok(Self::new(
            ForecastClient::from_env(metrics)?,
            ServerConfig::from_env().default_units,
        ))
    }
}

/// Creates the OpenAPI specification for the dashboard API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Weather Dashboard".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Weather dashboard backed by a forecast API and reverse geocoding.\n\n\
                ## Locations\n\
                Every forecast request names a location either by `city` or by `lat` and `lon`. \
                When both are given the city name wins.\n\
                \n\
                For coordinates the place name comes from reverse geocoding (Nominatim) when it \
                answers; otherwise the forecast backend's own name is kept.\n\
                \n\
                ## Units\n\
                `units=metric` (default) gives °C and m/s, `units=imperial` gives °F and mph.\n\
                \n\
                **Configuration:**\n\
                - `FORECAST_API_URL` / `FORECAST_API_TIMEOUT_MS`: forecast backend\n\
                - `GEOCODE_API_URL` / `GEOCODE_API_TIMEOUT_MS` / `GEOCODE_USER_AGENT`: geocoder\n\
                - `DEFAULT_UNITS`: unit system used when a request names none"
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the application with routes, middleware and shared state
///
/// Used by `main` and by the integration tests, which point the services at
/// mock upstreams.
pub fn create_base_app(
    services: AppServices,
    metrics: AppMetrics,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let metrics_config = MetricsConfig::from_env();

    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(services))
        .app_data(web::Data::new(metrics_config))
        .app_data(web::Data::new(metrics))
        .service(web::resource("/").route(web::get().to(dashboard)))
        .service(web::resource("/api/forecast").route(web::get().to(forecast)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}

//! Weather Dashboard - forecast lookups by city or coordinates
//!
//! An Actix Web service that fetches multi-day forecasts from a backend
//! weather API and renders them as a dashboard page and a JSON API:
//! - Forecasts by city name or by latitude/longitude
//! - Reverse geocoding (Nominatim) to name coordinate lookups
//! - Metric/imperial toggle with refetch by the best known location
//! - Prometheus metrics for requests and upstream calls
//! - OpenAPI documentation
//!
//! ## Architecture
//!
//! - `models/` - Forecast payloads, locations, units and view models
//! - `handlers/` - HTTP handlers and the app factory
//! - `middleware/` - Request IDs, access logging and metrics
//! - `services/` - Upstream clients, dashboard state and presentation
//! - `utils/` - Formatting and request helpers
//! - `config/` - Environment-driven configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use weather_dashboard::{create_base_app, AppMetrics, AppServices};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let metrics = AppMetrics::new().map_err(std::io::Error::other)?;
//!     let services =
//!         AppServices::from_env(Some(metrics.client.clone())).map_err(std::io::Error::other)?;
//!     let _app = create_base_app(services, metrics);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{MetricsConfig, ServerConfig};
pub use handlers::{
    create_base_app, create_openapi_spec, dashboard, forecast, get_metrics, health,
    render_dashboard, version, AppServices,
};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware};
pub use models::{
    Coordinates, DailyForecast, ErrorResponse, Forecast, ForecastQuery, HealthResponse,
    HourlyForecast, Locator, PlaceDescriptor, Units, VersionResponse,
};
pub use services::{
    build_view, AppMetrics, ClientError, ClientMetrics, DashboardState, ForecastClient,
    ForecastError, ForecastSource, GeocodeClient, GeocodeOutcome, HttpClientConfig,
};
pub use utils::{compass_label, extract_client_ip, extract_route_pattern, extract_user_agent};

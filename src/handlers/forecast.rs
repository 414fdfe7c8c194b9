//! Forecast JSON endpoint handler.

use crate::{
    handlers::openapi::AppServices,
    models::{ErrorResponse, ForecastQuery},
    services::{ForecastError, ForecastSource},
};
use actix_web::{http::StatusCode, web, Error, HttpRequest, HttpResponse, Result};
use paperclip::actix::api_v2_operation;

/// HTTP status for a failed upstream fetch. Client errors reported by the
/// backend (unknown city, bad coordinates) keep their status; any other
/// backend status is a bad gateway.
pub fn forecast_error_status(err: &ForecastError) -> StatusCode {
    match err {
        ForecastError::Connection(_) => StatusCode::GATEWAY_TIMEOUT,
        ForecastError::Backend { status, .. } | ForecastError::Status(status) => {
            StatusCode::from_u16(*status)
                .ok()
                .filter(StatusCode::is_client_error)
                .unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ForecastError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Forecast endpoint
///
/// Returns the multi-day forecast for a city name or a coordinate pair. For
/// coordinates the place name is taken from reverse geocoding when available.
#[api_v2_operation(
    summary = "Forecast Endpoint",
    description = "Returns a multi-day forecast with hourly samples. Accepts either a city name (e.g., ?city=Paris) or latitude/longitude coordinates (e.g., ?lat=48.85&lon=2.35), plus optional units=metric|imperial.",
    tags("Forecast"),
    parameters(
        ("city" = Option<String>, Query, description = "City name (e.g., Paris)"),
        ("lat" = Option<f64>, Query, description = "Latitude coordinate"),
        ("lon" = Option<f64>, Query, description = "Longitude coordinate"),
        ("units" = Option<String>, Query, description = "metric (default) or imperial"),
    ),
    responses(
        (status = 200, description = "Successful response"),
        (status = 400, description = "Bad Request - Invalid or missing location parameters"),
        (status = 502, description = "Bad Gateway - Weather backend returned an error"),
        (status = 504, description = "Gateway Timeout - Weather backend unreachable")
    )
)]
pub async fn forecast(
    req: HttpRequest,
    query: web::Query<ForecastQuery>,
) -> Result<HttpResponse, Error> {
    let units = query
        .units()
        .map_err(|e| actix_web::error::ErrorBadRequest(e.to_string()))?;

    let locator = query
        .locator()
        .map_err(|e| actix_web::error::ErrorBadRequest(e.to_string()))?
        .ok_or_else(|| {
            actix_web::error::ErrorBadRequest(
                "Either 'city' or both 'lat' and 'lon' parameters are required",
            )
        })?;

    let services = req
        .app_data::<web::Data<AppServices>>()
        .ok_or_else(|| actix_web::error::ErrorServiceUnavailable("Forecast service not configured"))?;

    match services.forecast.forecast_for(&locator, units).await {
        Ok(data) => {
            tracing::debug!(
                place = %data.city_info.display_name(),
                days = data.daily_forecasts.len(),
                "Returning forecast"
            );
            Ok(HttpResponse::Ok().json(data))
        }
        Err(err) => {
            tracing::error!(locator = ?locator, error = %err, "Forecast request failed");
            Ok(HttpResponse::build(forecast_error_status(&err)).json(ErrorResponse {
                error: err.user_message(),
            }))
        }
    }
}

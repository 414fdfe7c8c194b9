//! Health check endpoint handler.

use crate::models::HealthResponse;
use actix_web::{web, Result};
use paperclip::actix::api_v2_operation;

/// Health check endpoint
///
/// Reports that the dashboard service is up. Upstream availability is not
/// checked; the forecast backend and geocoder are only contacted on demand.
#[api_v2_operation(
    summary = "Health Check Endpoint",
    description = "Returns the current health status of the service in JSON format.",
    tags("Health"),
    responses(
        (status = 200, description = "Successful response", body = HealthResponse)
    )
)]
pub async fn health() -> Result<web::Json<HealthResponse>> {
    Ok(web::Json(HealthResponse {
        status: "healthy".to_string(),
    }))
}

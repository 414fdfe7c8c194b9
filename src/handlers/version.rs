//! Version information endpoint handler.

use crate::{
    models::VersionResponse,
    services::metrics::{build_commit, build_timestamp},
};
use actix_web::{web, Result};
use paperclip::actix::api_v2_operation;

/// Version information endpoint
///
/// Returns the crate version plus the commit and build time recorded at
/// compile time ("unknown" when built outside a git checkout).
#[api_v2_operation(
    summary = "Version Information Endpoint",
    description = "Returns the current service version, commit hash, and build time.",
    tags("Version"),
    responses(
        (status = 200, description = "Successful response", body = VersionResponse)
    )
)]
pub async fn version() -> Result<web::Json<VersionResponse>> {
    Ok(web::Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: build_commit().to_string(),
        build_time: build_timestamp().to_string(),
    }))
}

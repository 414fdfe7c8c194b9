//! Dashboard page handler.

use crate::{
    handlers::openapi::AppServices,
    models::{DashboardView, ForecastQuery, Locator, QueryError},
    services::{build_view, DashboardState, EMPTY_CITY_MESSAGE},
};
use actix_web::{web, Error, HttpRequest, HttpResponse, Result};
use askama::Template;
use paperclip::actix::api_v2_operation;

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate<'a> {
    view: &'a DashboardView,
}

/// Render a view to HTML
pub fn render_dashboard(view: &DashboardView) -> Result<String, askama::Error> {
    DashboardTemplate { view }.render()
}

/// Dashboard page
///
/// Search form, "use my location" and unit toggle, plus current conditions
/// and a 3-day outlook once a location is given.
#[api_v2_operation(
    summary = "Weather Dashboard Page",
    description = "Renders the weather dashboard. Accepts city, lat/lon and units like /api/forecast; without a location only the search form is shown.",
    tags("Dashboard"),
    responses(
        (status = 200, description = "HTML page", content_type = "text/html")
    )
)]
pub async fn dashboard(
    req: HttpRequest,
    query: web::Query<ForecastQuery>,
) -> Result<HttpResponse, Error> {
    let services = req
        .app_data::<web::Data<AppServices>>()
        .ok_or_else(|| actix_web::error::ErrorServiceUnavailable("Forecast service not configured"))?;

    // An unknown unit system falls back to the default rather than failing the page
    let units = query.units_or(services.default_units).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Ignoring invalid units parameter");
        services.default_units
    });
    let mut state = DashboardState::new(units);

    let request = match query.locator() {
        Ok(Some(Locator::City(city))) => state.search_city(&city).ok(),
        Ok(Some(Locator::Coordinates(coords))) => Some(state.use_location(coords)),
        Ok(None) => None,
        Err(QueryError::EmptyCity) => {
            state.show_error(EMPTY_CITY_MESSAGE);
            None
        }
        Err(e) => {
            state.show_error(e.to_string());
            None
        }
    };

    if let Some(request) = request {
        let result = request.execute(&services.forecast).await;
        state.complete(request.ticket, result);
    }

    let body = render_dashboard(&build_view(&state)).map_err(|e| {
        tracing::error!(error = %e, "Failed to render dashboard");
        actix_web::error::ErrorInternalServerError("Failed to render dashboard")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

//! Full-application tests: the app factory wired to stub upstreams.

mod common;

use actix_web::{http::StatusCode, test};
use common::*;
use weather_dashboard::{create_base_app, AppMetrics};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn upstreams() -> (MockServer, MockServer) {
    let backend = MockServer::start().await;
    let geocoder = MockServer::start().await;
    mount_paris_backend(&backend).await;
    mount_geocoder(&geocoder, ResponseTemplate::new(200).set_body_json(nominatim_paris())).await;
    (backend, geocoder)
}

/// Integration test for the health check endpoint
#[actix_web::test]
async fn test_health_endpoint_integration() {
    let (backend, geocoder) = upstreams().await;
    let app = test::init_service(create_base_app(
        services(&backend.uri(), &geocoder.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK, "Expected 200 OK status");
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json, serde_json::json!({"status": "healthy"}));
}

/// The version endpoint reports the package version and build metadata
#[actix_web::test]
async fn test_version_endpoint_integration() {
    let (backend, geocoder) = upstreams().await;
    let app = test::init_service(create_base_app(
        services(&backend.uri(), &geocoder.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["commit"].is_string(), "Commit should be a string");
    assert!(json["build_time"].is_string(), "Build time should be a string");
}

#[actix_web::test]
async fn test_forecast_by_city_integration() {
    let (backend, geocoder) = upstreams().await;
    let app = test::init_service(create_base_app(
        services(&backend.uri(), &geocoder.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get()
        .uri("/api/forecast?city=Paris&units=metric")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["daily_forecasts"][0], paris_fixture()["daily_forecasts"][0]);
    assert_eq!(json["city_info"]["name"], "Paris");
}

#[actix_web::test]
async fn test_forecast_by_coordinates_integration() {
    let (backend, geocoder) = upstreams().await;
    let app = test::init_service(create_base_app(
        services(&backend.uri(), &geocoder.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/forecast?lat={PARIS_LAT}&lon={PARIS_LON}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["city_info"]["country"], "France");
    assert_eq!(json["city_info"]["state"], "Île-de-France");
    assert_eq!(json["city_info"]["lat"], 48.8534);
}

#[actix_web::test]
async fn test_forecast_backend_not_found_passes_through() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/city"))
        .and(query_param("city", "Atlantis"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"detail": "City 'Atlantis' not found"})),
        )
        .mount(&backend)
        .await;

    let app = test::init_service(create_base_app(
        services(&backend.uri(), &backend.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get()
        .uri("/api/forecast?city=Atlantis")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["error"], "City 'Atlantis' not found");
}

#[actix_web::test]
async fn test_forecast_backend_server_error_is_bad_gateway() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/city"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend)
        .await;

    let app = test::init_service(create_base_app(
        services(&backend.uri(), &backend.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/forecast?city=Paris").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["error"], "Failed to fetch weather data. Please try again.");
}

#[actix_web::test]
async fn test_forecast_backend_validation_error_passes_through() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/city"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "detail": [{"loc": ["query", "units"], "msg": "value is not a valid enumeration member"}]
        })))
        .mount(&backend)
        .await;

    let app = test::init_service(create_base_app(
        services(&backend.uri(), &backend.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/forecast?city=Paris").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["error"], "value is not a valid enumeration member");
}

#[actix_web::test]
async fn test_forecast_blank_city_with_coordinates() {
    let (backend, geocoder) = upstreams().await;
    let app = test::init_service(create_base_app(
        services(&backend.uri(), &geocoder.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/forecast?city=&lat={PARIS_LAT}&lon={PARIS_LON}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["city_info"]["country"], "France");
}

#[actix_web::test]
async fn test_forecast_backend_unreachable_is_gateway_timeout() {
    let app = test::init_service(create_base_app(
        services("http://127.0.0.1:9", "http://127.0.0.1:9"),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/forecast?city=Paris").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        json["error"],
        "Unable to reach the weather service. Please check your connection and try again."
    );
}

#[actix_web::test]
async fn test_dashboard_page_renders_forecast() {
    let (backend, geocoder) = upstreams().await;
    let app = test::init_service(create_base_app(
        services(&backend.uri(), &geocoder.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/?city=Paris").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("Paris, Ile-de-France, FR"));
    assert!(html.contains("21°C"));
    // Three days after today, and no more
    assert!(html.contains("Sunday"));
    assert!(html.contains("Monday"));
    assert!(html.contains("Tuesday"));
    assert!(!html.contains("Wednesday"));
    assert!(html.contains("Show °F"));
}

#[actix_web::test]
async fn test_dashboard_blank_city_shows_message() {
    let backend = MockServer::start().await;
    let app = test::init_service(create_base_app(
        services(&backend.uri(), &backend.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/?city=%20%20").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("Please enter a city name"));
    assert!(backend.received_requests().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_dashboard_without_location_shows_search_only() {
    let backend = MockServer::start().await;
    let app = test::init_service(create_base_app(
        services(&backend.uri(), &backend.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("Search city"));
    assert!(!html.contains("class=\"error\""));
    assert!(backend.received_requests().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_dashboard_backend_error_is_shown() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/city"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"detail": "City not found"})),
        )
        .mount(&backend)
        .await;

    let app = test::init_service(create_base_app(
        services(&backend.uri(), &backend.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/?city=Nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("City not found"));
}

/// Test that Request ID middleware adds X-Request-ID header to responses
#[actix_web::test]
async fn test_request_id_header_added() {
    let (backend, geocoder) = upstreams().await;
    let app = test::init_service(create_base_app(
        services(&backend.uri(), &geocoder.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.headers().contains_key("x-request-id"));
}

#[actix_web::test]
async fn test_metrics_include_upstream_calls() {
    let (backend, geocoder) = upstreams().await;
    let app = test::init_service(create_base_app(
        services(&backend.uri(), &geocoder.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/forecast?city=Paris").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("http_requests_total"));
    assert!(text.contains("route=\"/api/forecast\""));
    assert!(text.contains("app_uptime_seconds"));
}

#[actix_web::test]
async fn test_openapi_spec_lists_routes() {
    let (backend, geocoder) = upstreams().await;
    let app = test::init_service(create_base_app(
        services(&backend.uri(), &geocoder.uri()),
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/spec/v2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["info"]["title"], "Weather Dashboard");
    assert!(json["paths"]["/api/forecast"].is_object());
    assert!(json["paths"]["/api/health"].is_object());
}

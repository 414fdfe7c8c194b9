//! Metrics collection and Prometheus integration service.

use prometheus::{CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::time::{Duration, Instant};

/// Build metadata reported by `/api/version` and the `app_info` metric
pub fn build_commit() -> &'static str {
    option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
}

pub fn build_timestamp() -> &'static str {
    option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
}

/// Metrics for outbound calls to the forecast backend and the geocoder
#[derive(Clone)]
pub struct ClientMetrics {
    /// Upstream requests by destination, path and outcome
    pub upstream_requests_total: CounterVec,

    /// Upstream request duration by destination and path
    pub upstream_request_duration_seconds: HistogramVec,

    /// Geocoding lookups that produced no place, by reason
    pub geocode_fallbacks_total: CounterVec,
}

impl ClientMetrics {
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let upstream_requests_total = CounterVec::new(
            Opts::new(
                "upstream_requests_total",
                "Total upstream HTTP requests by destination, path, and outcome",
            ),
            &["destination", "path", "outcome"],
        )?;

        let upstream_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "upstream_request_duration_seconds",
                "Duration of upstream HTTP requests",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0]),
            &["destination", "path"],
        )?;

        let geocode_fallbacks_total = CounterVec::new(
            Opts::new(
                "geocode_fallbacks_total",
                "Reverse geocoding lookups that fell back to the backend place name",
            ),
            &["reason"],
        )?;

        registry.register(Box::new(upstream_requests_total.clone()))?;
        registry.register(Box::new(upstream_request_duration_seconds.clone()))?;
        registry.register(Box::new(geocode_fallbacks_total.clone()))?;

        Ok(Self {
            upstream_requests_total,
            upstream_request_duration_seconds,
            geocode_fallbacks_total,
        })
    }

    pub fn record_request(&self, destination: &str, path: &str, outcome: &str, duration: Duration) {
        self.upstream_requests_total
            .with_label_values(&[destination, path, outcome])
            .inc();
        self.upstream_request_duration_seconds
            .with_label_values(&[destination, path])
            .observe(duration.as_secs_f64());
    }

    pub fn record_geocode_fallback(&self, reason: &str) {
        self.geocode_fallbacks_total.with_label_values(&[reason]).inc();
    }
}

/// Application metrics collector for Prometheus integration
#[derive(Clone)]
pub struct AppMetrics {
    pub registry: Registry,
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub app_uptime_seconds: Gauge,
    pub app_info: CounterVec,
    pub client: ClientMetrics,
    pub start_time: Instant,
}

impl AppMetrics {
    /// Create the registry with server-side and upstream client metrics
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status", "route"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 25.0,
            ]),
            &["method", "route"],
        )?;

        let app_uptime_seconds = Gauge::new("app_uptime_seconds", "Application uptime in seconds")?;

        let app_info = CounterVec::new(
            Opts::new("app_info", "Application information"),
            &["version", "commit", "build_time"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(app_uptime_seconds.clone()))?;
        registry.register(Box::new(app_info.clone()))?;

        let client = ClientMetrics::new(&registry)?;

        app_info
            .with_label_values(&[env!("CARGO_PKG_VERSION"), build_commit(), build_timestamp()])
            .inc();

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            app_uptime_seconds,
            app_info,
            client,
            start_time: Instant::now(),
        })
    }

    /// Record a served request; scrapes of the metrics endpoint are skipped
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        if route == "/api/metrics" {
            return;
        }

        self.http_requests_total
            .with_label_values(&[method, &status.to_string(), route])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration.as_secs_f64());
    }

    pub fn update_uptime(&self) {
        self.app_uptime_seconds
            .set(self.start_time.elapsed().as_secs_f64());
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        encoder.encode_to_string(&self.registry.gather())
    }
}

use actix_web::HttpServer;
use tracing_subscriber::EnvFilter;
use weather_dashboard::{create_base_app, AppMetrics, AppServices, ServerConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let server_config = ServerConfig::from_env();
    let metrics = AppMetrics::new().map_err(std::io::Error::other)?;
    let services =
        AppServices::from_env(Some(metrics.client.clone())).map_err(std::io::Error::other)?;

    let (host, port) = server_config.bind_address();
    tracing::info!(
        host = %host,
        port = port,
        default_units = %server_config.default_units,
        "Weather dashboard listening"
    );

    HttpServer::new(move || create_base_app(services.clone(), metrics.clone()))
        .bind((host.as_str(), port))?
        .run()
        .await
}

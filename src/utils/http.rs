//! HTTP utility functions for extracting request information.

use actix_web::HttpRequest;

/// Extract client IP address, preferring the first `X-Forwarded-For` hop and
/// falling back to the connection peer address
pub fn extract_client_ip(req: &HttpRequest) -> String {
    let forwarded = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    match forwarded {
        Some(ip) => ip.to_string(),
        None => req
            .connection_info()
            .peer_addr()
            .unwrap_or("unknown")
            .to_string(),
    }
}

/// Extract user agent from request headers
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

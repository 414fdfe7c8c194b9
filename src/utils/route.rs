//! Route pattern extraction utilities.

use actix_web::HttpRequest;

/// Route label used for request metrics.
///
/// Uses the matched resource pattern so query strings and unknown paths do
/// not create new label values.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| "/unmatched".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_unmatched_request_is_grouped() {
        let req = TestRequest::get().uri("/does/not/exist?x=1").to_http_request();
        assert_eq!(extract_route_pattern(&req), "/unmatched");
    }
}

//! Request ID middleware for request tracing and correlation.
//!
//! An upstream proxy may already have assigned an ID. It is reused only if it
//! looks like one (short, URL-safe characters); anything else is replaced with
//! a fresh UUID v4 so client-controlled text never lands in logs verbatim.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LENGTH: usize = 64;

/// Whether an inbound request ID is safe to reuse.
fn is_acceptable(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LENGTH
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.')
}

/// Middleware that ensures every request has a request ID.
///
/// The ID is recorded on the current span, set as a Sentry tag, and returned
/// in the `x-request-id` response header.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| is_acceptable(id))
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", &request_id);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_uuid_and_proxy_ids() {
        assert!(is_acceptable("4f1c2a0e-8b7d-4e53-9f8a-2c6d1e0b7a93"));
        assert!(is_acceptable("8c2f1b7e9d0a4c3b-SIN"));
        assert!(is_acceptable("req_01.abc"));
    }

    #[test]
    fn test_rejects_unsafe_ids() {
        assert!(!is_acceptable(""));
        assert!(!is_acceptable("id with spaces"));
        assert!(!is_acceptable("line\nbreak"));
        assert!(!is_acceptable(&"a".repeat(MAX_REQUEST_ID_LENGTH + 1)));
    }
}

//! Campus merch storefront library.
//!
//! The HTTP surface over `campus-merch-core`: the checkout API that prices
//! carts and links PromptPay QR codes, and the image proxy that turns sealed
//! tokens back into storage redirects. Built as a library so the router can
//! be exercised in-process by the integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::{
    Router,
    extract::MatchedPath,
    http::{Request, Response},
    middleware::from_fn,
    routing::get,
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Build the application router with its request-scoped middleware.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    // The route template, not the URI: image paths carry tokens.
                    let route = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map_or("<unmatched>", MatchedPath::as_str);
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        route = %route,
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

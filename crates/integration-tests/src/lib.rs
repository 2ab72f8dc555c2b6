//! Integration tests for the campus merch storefront.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; no
//! server, network or environment variables are needed.
//!
//! ```bash
//! cargo test -p campus-merch-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header::CONTENT_TYPE},
};
use campus_merch_core::{PromptPayConfig, PromptPayId};
use campus_merch_storefront::{
    app,
    config::{ImageTokenConfig, StorefrontConfig},
    state::AppState,
};
use secrecy::SecretString;
use tower::ServiceExt;

/// Current image token passphrase used by the test app.
pub const CURRENT_SECRET: &str = "Qz8!vN3@rT6#kW1$mX5^pL9&bH2*dF7%";

/// Retired passphrase the test app still accepts.
pub const PREVIOUS_SECRET: &str = "Jc4%yU7!gE2@sA9#oI5$nR8^tV1&wK6*";

/// Mobile PromptPay ID used when PromptPay is enabled.
pub const MERCHANT_MOBILE: &str = "0812345678";

/// Build a storefront config that needs no environment.
#[must_use]
pub fn test_config(promptpay: PromptPayConfig) -> StorefrontConfig {
    StorefrontConfig {
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        image_tokens: ImageTokenConfig {
            secret: SecretString::from(CURRENT_SECRET),
            previous_secrets: vec![SecretString::from(PREVIOUS_SECRET)],
        },
        promptpay,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// PromptPay settings with the test merchant ID.
///
/// # Panics
///
/// Panics if [`MERCHANT_MOBILE`] stops parsing.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn enabled_promptpay() -> PromptPayConfig {
    PromptPayConfig::new(Some(PromptPayId::parse(MERCHANT_MOBILE).unwrap()))
}

/// Application state and router for a test.
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    /// App with PromptPay enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_promptpay(enabled_promptpay())
    }

    /// App with the given PromptPay settings.
    ///
    /// # Panics
    ///
    /// Panics if the test secrets are rejected.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn with_promptpay(promptpay: PromptPayConfig) -> Self {
        let state = AppState::new(test_config(promptpay)).unwrap();
        let router = app(state.clone());
        Self { state, router }
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    #[allow(clippy::unwrap_used)]
    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send a POST request with a JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    #[allow(clippy::unwrap_used)]
    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> Response<Body> {
        let request = Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a response body as UTF-8 text.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
#[allow(clippy::unwrap_used)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not valid JSON.
#[allow(clippy::unwrap_used)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

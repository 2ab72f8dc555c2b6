//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Health check
//!
//! # Images
//! GET  /images/{token}           - Redirect to the sealed storage URL
//!
//! # Checkout API (JSON)
//! POST /api/checkout/total       - Total of a cart
//! GET  /api/checkout/promptpay   - PromptPay QR link for ?amount=
//! POST /api/checkout/quote       - Total plus QR link
//! ```

pub mod checkout;
pub mod images;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the image proxy routes router.
pub fn image_routes() -> Router<AppState> {
    Router::new().route("/{token}", get(images::show))
}

/// Create the checkout API routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/total", post(checkout::total))
        .route("/promptpay", get(checkout::promptpay_qr))
        .route("/quote", post(checkout::quote))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/images", image_routes())
        .nest("/api/checkout", checkout_routes())
}

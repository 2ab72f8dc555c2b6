//! Integration tests for the checkout API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::{
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use campus_merch_core::PromptPayConfig;
use campus_merch_integration_tests::{TestApp, body_json};
use serde_json::json;
use tower::ServiceExt;

const QR_100: &str = "https://quickchart.io/qr/?size=300&text=00020101021129370016A0000006770101110113006681234567853037645406100.005802TH63045169";

// =============================================================================
// Totals
// =============================================================================

#[tokio::test]
async fn test_total_jersey_pair() {
    let app = TestApp::new();
    let response = app
        .post_json(
            "/api/checkout/total",
            &json!([{"name": "JERSEY", "size": "M", "qty": 2}]),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"total": "678.00", "currency": "THB", "display": "฿678.00"})
    );
}

#[tokio::test]
async fn test_total_long_sleeve() {
    let app = TestApp::new();
    let response = app
        .post_json(
            "/api/checkout/total",
            &json!([{"name": "JERSEY", "size": "M", "qty": 2, "sleeve": "LONG"}]),
        )
        .await;
    assert_eq!(body_json(response).await["total"], "778.00");
}

#[tokio::test]
async fn test_total_lenient_lines() {
    let app = TestApp::new();
    let cart = json!([
        {"name": "CREW", "size": "3XL", "qty": "2"},
        {"name": "Lanyard", "price": "45.5"},
        {"name": "Sticker"},
        "not a line",
    ]);
    let response = app.post_json("/api/checkout/total", &cart).await;
    // 2 * 289 + 45.50
    assert_eq!(body_json(response).await["total"], "623.50");
}

#[tokio::test]
async fn test_total_overflowing_line_does_not_abort() {
    let app = TestApp::new();
    let cart = json!([
        {"name": "Tote", "price": "79228162514264337593543950335", "qty": 2},
        {"name": "JERSEY", "size": "M"},
    ]);
    let response = app.post_json("/api/checkout/total", &cart).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["total"], "339.00");
}

#[tokio::test]
async fn test_total_non_array_is_zero() {
    let app = TestApp::new();
    let response = app
        .post_json("/api/checkout/total", &json!({"name": "JERSEY"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["total"], "0.00");
}

#[tokio::test]
async fn test_total_invalid_json_is_rejected() {
    let app = TestApp::new();
    let request = Request::post("/api/checkout/total")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("[{"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// PromptPay
// =============================================================================

#[tokio::test]
async fn test_promptpay_qr_url() {
    let app = TestApp::new();
    let response = app.get("/api/checkout/promptpay?amount=100").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"enabled": true, "qr_url": QR_100})
    );
}

#[tokio::test]
async fn test_promptpay_zero_amount() {
    let app = TestApp::new();
    let response = app.get("/api/checkout/promptpay?amount=0").await;
    let body = body_json(response).await;
    assert!(body["qr_url"].as_str().unwrap().contains("54040.00"));
}

#[tokio::test]
async fn test_promptpay_bad_amounts() {
    let app = TestApp::new();
    for uri in [
        "/api/checkout/promptpay?amount=-1",
        "/api/checkout/promptpay?amount=abc",
        "/api/checkout/promptpay?amount=",
        "/api/checkout/promptpay",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_promptpay_disabled() {
    let app = TestApp::with_promptpay(PromptPayConfig::default());
    let response = app.get("/api/checkout/promptpay?amount=100").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"enabled": false, "qr_url": null})
    );
}

#[tokio::test]
async fn test_promptpay_custom_endpoint() {
    let promptpay = campus_merch_integration_tests::enabled_promptpay()
        .with_qr_endpoint("https://qr.internal.test/render");
    let app = TestApp::with_promptpay(promptpay);
    let response = app.get("/api/checkout/promptpay?amount=1").await;
    let body = body_json(response).await;
    assert!(
        body["qr_url"]
            .as_str()
            .unwrap()
            .starts_with("https://qr.internal.test/render?size=300&text=000201")
    );
}

// =============================================================================
// Quote
// =============================================================================

#[tokio::test]
async fn test_quote_links_qr_to_total() {
    let app = TestApp::new();
    let response = app
        .post_json(
            "/api/checkout/quote",
            &json!([{"name": "JERSEY", "size": "M", "qty": 2}]),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], "678.00");
    assert_eq!(body["currency"], "THB");
    assert_eq!(body["promptpay"]["enabled"], true);
    assert!(
        body["promptpay"]["qr_url"]
            .as_str()
            .unwrap()
            .contains("5406678.00")
    );
}

#[tokio::test]
async fn test_quote_without_promptpay() {
    let app = TestApp::with_promptpay(PromptPayConfig::default());
    let response = app
        .post_json("/api/checkout/quote", &json!([{"name": "CREW", "size": "L"}]))
        .await;

    let body = body_json(response).await;
    assert_eq!(body["display"], "฿259.00");
    assert_eq!(body["promptpay"], json!({"enabled": false, "qr_url": null}));
}

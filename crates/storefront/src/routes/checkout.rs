//! Checkout API.
//!
//! The checkout page posts the cart as a JSON array of line items and shows
//! the server's total, never one computed in the browser. The same total is
//! what the PromptPay QR code charges.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Query, State},
};
use campus_merch_core::{Price, PromptPayError, order_total_from_json, promptpay};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Order total as shown to the customer.
#[derive(Debug, Serialize)]
pub struct TotalResponse {
    /// Amount with two decimal places, e.g. `678.00`.
    pub total: String,
    /// ISO 4217 code.
    pub currency: &'static str,
    /// Amount with currency symbol, e.g. `฿678.00`.
    pub display: String,
}

impl From<&Price> for TotalResponse {
    fn from(price: &Price) -> Self {
        Self {
            total: price.fixed_2dp(),
            currency: price.currency_code.code(),
            display: price.display(),
        }
    }
}

/// PromptPay QR link for an amount.
#[derive(Debug, Serialize)]
pub struct PromptPayResponse {
    /// Whether the shop accepts PromptPay.
    pub enabled: bool,
    /// QR image URL, `null` when PromptPay is disabled.
    pub qr_url: Option<String>,
}

/// Total plus the PromptPay QR link for it.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    /// Order total, flattened into the top level.
    #[serde(flatten)]
    pub total: TotalResponse,
    /// QR link for the total.
    pub promptpay: PromptPayResponse,
}

/// Query string for [`promptpay_qr`].
#[derive(Debug, Deserialize)]
pub struct PromptPayQuery {
    /// Amount in baht, as typed by the customer.
    pub amount: Option<String>,
}

/// Parse a decimal amount from user input.
fn parse_amount(raw: Option<&str>) -> Result<Decimal> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("amount is required".to_string()))?;

    let amount = Decimal::from_str(raw)
        .map_err(|_| AppError::BadRequest(format!("invalid amount: {raw}")))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PromptPayError::NegativeAmount(amount).into());
    }
    Ok(amount)
}

fn promptpay_for(state: &AppState, amount: Decimal) -> Result<PromptPayResponse> {
    let qr_url = promptpay::qr_url(state.promptpay(), amount)?;
    Ok(PromptPayResponse {
        enabled: state.promptpay().is_enabled(),
        qr_url,
    })
}

/// Compute the total of a cart.
///
/// POST /api/checkout/total
///
/// Malformed lines are priced leniently; a body that is not an array totals zero.
#[instrument(skip_all)]
pub async fn total(Json(cart): Json<Value>) -> Json<TotalResponse> {
    let price = Price::thb(order_total_from_json(&cart));
    tracing::debug!(total = %price, "order total computed");
    Json(TotalResponse::from(&price))
}

/// PromptPay QR link for an amount.
///
/// GET /api/checkout/promptpay?amount=678.00
#[instrument(skip(state))]
pub async fn promptpay_qr(
    State(state): State<AppState>,
    Query(query): Query<PromptPayQuery>,
) -> Result<Json<PromptPayResponse>> {
    let amount = parse_amount(query.amount.as_deref())?;
    Ok(Json(promptpay_for(&state, amount)?))
}

/// Total of a cart together with the QR link that charges it.
///
/// POST /api/checkout/quote
#[instrument(skip_all)]
pub async fn quote(
    State(state): State<AppState>,
    Json(cart): Json<Value>,
) -> Result<Json<QuoteResponse>> {
    let price = Price::thb(order_total_from_json(&cart));
    let qr = promptpay_for(&state, price.amount)?;

    Ok(Json(QuoteResponse {
        total: TotalResponse::from(&price),
        promptpay: qr,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(Some("678")).unwrap(), Decimal::from(678));
        assert_eq!(parse_amount(Some(" 12.50 ")).unwrap(), Decimal::new(1250, 2));
        assert_eq!(parse_amount(Some("0")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        assert!(matches!(parse_amount(None), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_amount(Some("  ")), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_amount(Some("abc")), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_amount(Some("-1")), Err(AppError::PromptPay(_))));
    }

    #[test]
    fn test_total_response_from_price() {
        let response = TotalResponse::from(&Price::thb(Decimal::from(678)));
        assert_eq!(response.total, "678.00");
        assert_eq!(response.currency, "THB");
        assert_eq!(response.display, "฿678.00");
    }
}

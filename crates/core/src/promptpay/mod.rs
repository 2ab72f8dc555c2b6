//! PromptPay QR payloads.
//!
//! Builds the EMVCo merchant-presented payload that Thai banking apps scan,
//! and wraps it in a link to an external QR rendering service. Nothing here
//! makes a network request; the checkout page hands the URL to the browser.
//!
//! # Payload layout
//!
//! ```text
//! 000201                      payload format indicator
//! 010211                      point of initiation (static)
//! 29 LL                       merchant account information
//!    0016A000000677010111     PromptPay application ID
//!    01|02|03 LL <target>     mobile | tax ID | e-wallet
//! 5303764                     currency (THB)
//! 54 LL <amount>              transaction amount, two decimals
//! 5802TH                      country
//! 6304 <crc16>                checksum over everything before it
//! ```

mod tlv;

pub use tlv::{crc16, tlv};

use rust_decimal::Decimal;

use crate::types::{CurrencyCode, PromptPayId, format_amount_2dp};

/// PromptPay application identifier (tag `29`, sub-tag `00`).
pub const PROMPTPAY_AID: &str = "A000000677010111";

/// QR rendering endpoint used when none is configured.
pub const DEFAULT_QR_ENDPOINT: &str = "https://quickchart.io/qr/";

/// Edge length, in pixels, requested from the QR renderer.
pub const QR_SIZE: u32 = 300;

/// Errors that can occur while building a PromptPay payload.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum PromptPayError {
    /// Amount is below zero.
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
}

/// Merchant-side PromptPay settings.
///
/// A missing merchant identifier means PromptPay is switched off for this
/// deployment; [`qr_url`] then returns `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayConfig {
    /// Merchant identifier receiving payments.
    pub merchant_id: Option<PromptPayId>,
    /// Base URL of the QR rendering service.
    pub qr_endpoint: String,
}

impl PromptPayConfig {
    /// Create a configuration using the default QR endpoint.
    #[must_use]
    pub fn new(merchant_id: Option<PromptPayId>) -> Self {
        Self {
            merchant_id,
            qr_endpoint: DEFAULT_QR_ENDPOINT.to_string(),
        }
    }

    /// Override the QR rendering endpoint.
    #[must_use]
    pub fn with_qr_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.qr_endpoint = endpoint.into();
        self
    }

    /// Whether a merchant identifier is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.merchant_id.is_some()
    }
}

impl Default for PromptPayConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Build the checksummed PromptPay payload for `amount` baht.
///
/// The amount is rounded half away from zero to two decimal places.
///
/// # Errors
///
/// Returns [`PromptPayError::NegativeAmount`] if `amount` is below zero.
/// Zero is accepted and encoded as `0.00`.
pub fn payload(merchant_id: &PromptPayId, amount: Decimal) -> Result<String, PromptPayError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PromptPayError::NegativeAmount(amount));
    }

    let target = merchant_id.target();
    let account = tlv("00", PROMPTPAY_AID) + &tlv(target.sub_tag(), &merchant_id.account_value());

    let fields = [
        tlv("00", "01"),
        tlv("01", "12"),
        tlv("29", &account),
        tlv("53", CurrencyCode::THB.numeric()),
        tlv("54", &format_amount_2dp(amount)),
        tlv("58", "TH"),
        "6304".to_string(),
    ];

    let body = fields.concat();
    let checksum = crc16(&body);
    Ok(body + &checksum)
}

/// Build the QR image URL for `amount` baht, or `None` when PromptPay is
/// not configured.
///
/// The URL has the form `{endpoint}?size=300&text={url-encoded payload}`.
///
/// # Errors
///
/// Returns [`PromptPayError::NegativeAmount`] if PromptPay is configured and
/// `amount` is below zero.
pub fn qr_url(config: &PromptPayConfig, amount: Decimal) -> Result<Option<String>, PromptPayError> {
    let Some(merchant_id) = config.merchant_id.as_ref() else {
        tracing::debug!("PromptPay disabled: no merchant ID configured");
        return Ok(None);
    };

    let payload = payload(merchant_id, amount)?;
    Ok(Some(format!(
        "{}?size={QR_SIZE}&text={}",
        config.qr_endpoint,
        urlencoding::encode(&payload)
    )))
}

//! PromptPay command.
//!
//! # Environment Variables
//!
//! - `PROMPTPAY_ID` - Merchant PromptPay ID (required for this command)
//! - `PROMPTPAY_QR_ENDPOINT` - QR rendering service

use std::str::FromStr;

use campus_merch_core::{PromptPayError, promptpay};
use campus_merch_storefront::config::{ConfigError, promptpay_from_env};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the PromptPay command.
#[derive(Debug, Error)]
pub enum PromptPayCommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("PROMPTPAY_ID is not set; PromptPay is disabled")]
    Disabled,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error(transparent)]
    PromptPay(#[from] PromptPayError),
}

fn parse_amount(raw: &str) -> Result<Decimal, PromptPayCommandError> {
    Decimal::from_str(raw.trim()).map_err(|_| PromptPayCommandError::InvalidAmount(raw.to_owned()))
}

/// Print the QR image URL (or the raw payload) for `amount` baht.
pub fn show(amount: &str, raw_payload: bool) -> Result<(), PromptPayCommandError> {
    let amount = parse_amount(amount)?;
    let config = promptpay_from_env()?;
    let merchant_id = config
        .merchant_id
        .as_ref()
        .ok_or(PromptPayCommandError::Disabled)?;

    let output = if raw_payload {
        promptpay::payload(merchant_id, amount)?
    } else {
        promptpay::qr_url(&config, amount)?.ok_or(PromptPayCommandError::Disabled)?
    };

    tracing::info!(id_kind = ?merchant_id.target(), %amount, "PromptPay link built");

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("678").unwrap(), Decimal::from(678));
        assert_eq!(parse_amount(" 250.50\n").unwrap(), Decimal::new(25050, 2));
        assert!(matches!(
            parse_amount("six hundred"),
            Err(PromptPayCommandError::InvalidAmount(_))
        ));
    }
}

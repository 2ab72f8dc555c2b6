//! Unified error handling for route handlers.
//!
//! All route handlers should return `Result<T, AppError>`. Every variant is a
//! client error; server faults surface through the Sentry tower layers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_merch_core::PromptPayError;
use thiserror::Error;

/// Body returned for every rejected image token.
///
/// Identical for all failure causes so a caller cannot probe which check failed.
pub const IMAGE_NOT_FOUND: &str = "Image not found";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// PromptPay payload could not be built.
    #[error("PromptPay error: {0}")]
    PromptPay(#[from] PromptPayError),

    /// Image token did not open under any configured key.
    #[error("Image not found")]
    ImageNotFound,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ImageNotFound => StatusCode::NOT_FOUND,
            Self::PromptPay(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let message = match &self {
            Self::ImageNotFound => IMAGE_NOT_FOUND.to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid amount".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid amount");

        let err = AppError::from(PromptPayError::NegativeAmount(Decimal::new(-5, 0)));
        assert_eq!(
            err.to_string(),
            "PromptPay error: amount must not be negative, got -5"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(get_status(AppError::ImageNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::PromptPay(PromptPayError::NegativeAmount(
                Decimal::NEGATIVE_ONE
            ))),
            StatusCode::BAD_REQUEST
        );
    }
}

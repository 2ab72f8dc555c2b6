//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `IMAGE_TOKEN_SECRET` - Image token passphrase (min 32 chars, high entropy)
//!
//! ## Optional
//! - `IMAGE_TOKEN_PREVIOUS_SECRETS` - Comma-separated retired passphrases, still accepted on read
//! - `PROMPTPAY_ID` - Merchant PromptPay ID (mobile, tax ID or e-wallet); unset disables PromptPay
//! - `PROMPTPAY_QR_ENDPOINT` - QR rendering service (default: <https://quickchart.io/qr/>)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (e.g. production)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use campus_merch_core::{
    ImageCipher, ImageCipherError, PromptPayConfig, PromptPayId, promptpay::DEFAULT_QR_ENDPOINT,
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_IMAGE_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Image token passphrases
    pub image_tokens: ImageTokenConfig,
    /// PromptPay merchant settings
    pub promptpay: PromptPayConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Image token passphrases.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ImageTokenConfig {
    /// Passphrase used to seal new tokens
    pub secret: SecretString,
    /// Retired passphrases, tried in order after `secret`
    pub previous_secrets: Vec<SecretString>,
}

impl std::fmt::Debug for ImageTokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageTokenConfig")
            .field("secret", &"[REDACTED]")
            .field(
                "previous_secrets",
                &format!("[{} REDACTED]", self.previous_secrets.len()),
            )
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            image_tokens: ImageTokenConfig::from_env()?,
            promptpay: promptpay_from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ImageTokenConfig {
    /// Read `IMAGE_TOKEN_SECRET` and `IMAGE_TOKEN_PREVIOUS_SECRETS`.
    ///
    /// Shared with the CLI, which must open the same tokens.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the current secret is missing, short, or weak.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = get_validated_secret("IMAGE_TOKEN_SECRET")?;
        validate_secret_length(&secret, "IMAGE_TOKEN_SECRET")?;

        let previous_secrets = get_optional_env("IMAGE_TOKEN_PREVIOUS_SECRETS")
            .map(|raw| parse_secret_list(&raw))
            .unwrap_or_default();

        Ok(Self {
            secret,
            previous_secrets,
        })
    }

    /// Build the cipher that seals with `secret` and also opens with the
    /// previous secrets.
    ///
    /// # Errors
    ///
    /// Returns [`ImageCipherError::EmptySecret`] if any secret is empty.
    pub fn cipher(&self) -> Result<ImageCipher, ImageCipherError> {
        ImageCipher::new(self.secret.clone())?.with_previous(self.previous_secrets.iter().cloned())
    }
}

/// Read `PROMPTPAY_ID` and `PROMPTPAY_QR_ENDPOINT`.
///
/// Shared with the CLI, which accepts the same variables.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if `PROMPTPAY_ID` is set but is not a
/// valid PromptPay ID, or if the endpoint is not an absolute URL.
pub fn promptpay_from_env() -> Result<PromptPayConfig, ConfigError> {
    let merchant_id = get_optional_env("PROMPTPAY_ID")
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            PromptPayId::parse(&value).map_err(|e| {
                ConfigError::InvalidEnvVar("PROMPTPAY_ID".to_string(), e.to_string())
            })
        })
        .transpose()?;

    let endpoint = get_env_or_default("PROMPTPAY_QR_ENDPOINT", DEFAULT_QR_ENDPOINT);
    url::Url::parse(&endpoint).map_err(|e| {
        ConfigError::InvalidEnvVar("PROMPTPAY_QR_ENDPOINT".to_string(), e.to_string())
    })?;

    Ok(PromptPayConfig::new(merchant_id).with_qr_endpoint(endpoint))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Split a comma-separated list of secrets, dropping blank entries.
///
/// Retired secrets are not strength-checked; they were accepted when issued.
fn parse_secret_list(raw: &str) -> Vec<SecretString> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(SecretString::from)
        .collect()
}

/// Validate that a secret meets minimum length requirements.
fn validate_secret_length(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_IMAGE_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_IMAGE_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

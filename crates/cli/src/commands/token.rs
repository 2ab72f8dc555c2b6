//! Image token commands.
//!
//! # Environment Variables
//!
//! - `IMAGE_TOKEN_SECRET` - Current passphrase (same rules as the storefront)
//! - `IMAGE_TOKEN_PREVIOUS_SECRETS` - Retired passphrases, used by `open` only

use campus_merch_core::{ImageCipherError, image_token::legacy as legacy_scheme};
use campus_merch_storefront::config::{ConfigError, ImageTokenConfig};
use secrecy::ExposeSecret;
use thiserror::Error;
use url::Url;

/// Errors that can occur in token commands.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Secrets could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Cipher could not be built or the URL could not be sealed.
    #[error(transparent)]
    Cipher(#[from] ImageCipherError),

    /// Input is not an absolute http(s) URL.
    #[error("Not an absolute http(s) URL: {0}")]
    InvalidUrl(String),

    /// No configured key and scheme opened the token.
    #[error("Token did not open under any configured key")]
    Unreadable,
}

/// Reject anything the image proxy would refuse to redirect to.
fn require_http_url(url: &str) -> Result<(), TokenError> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(TokenError::InvalidUrl(url.to_owned())),
    }
}

/// Seal `url` with the current key and print the token.
pub fn seal(url: &str) -> Result<(), TokenError> {
    require_http_url(url)?;
    let cipher = ImageTokenConfig::from_env()?.cipher()?;
    let token = cipher.seal(url)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{token}");
    }
    Ok(())
}

/// Open `token` and print the URL.
///
/// Which scheme and key worked goes to the log, so stdout stays pipeable.
pub fn open(token: &str) -> Result<(), TokenError> {
    let cipher = ImageTokenConfig::from_env()?.cipher()?;
    let opened = cipher
        .open_detailed(token.trim())
        .ok_or(TokenError::Unreadable)?;

    tracing::info!(
        scheme = %opened.scheme,
        rotated_key = opened.rotated_key,
        "token opened"
    );
    if opened.is_stale() {
        tracing::warn!("token uses a retired scheme or key; reseal it with `cm-cli token seal`");
    }

    #[allow(clippy::print_stdout)]
    {
        println!("{}", opened.url);
    }
    Ok(())
}

/// Print a legacy-format token for `url` under the current key.
pub fn legacy(url: &str) -> Result<(), TokenError> {
    require_http_url(url)?;
    let config = ImageTokenConfig::from_env()?;
    let token = legacy_scheme::encode(url, config.secret.expose_secret());

    tracing::warn!("legacy tokens are unauthenticated; use them only to reproduce old links");

    #[allow(clippy::print_stdout)]
    {
        println!("{token}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_http_url() {
        assert!(require_http_url("https://storage.example.com/a.png").is_ok());
        assert!(require_http_url("http://localhost:9000/bucket/a.png").is_ok());
    }

    #[test]
    fn test_require_http_url_rejects_other_input() {
        assert!(matches!(
            require_http_url("ftp://storage.example.com/a.png"),
            Err(TokenError::InvalidUrl(_))
        ));
        assert!(require_http_url("slips/42.jpg").is_err());
        assert!(require_http_url("").is_err());
    }
}

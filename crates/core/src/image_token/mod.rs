//! Encrypted, URL-safe tokens for storage object URLs.
//!
//! Product photos and payment slips live in object storage. Public pages
//! never link to the bucket directly; they link to `/images/{token}`, and
//! the storefront opens the token to find the object to redirect to.
//!
//! # Schemes
//!
//! Tokens are opened by trying each [`TokenScheme`] in
//! [`TokenScheme::DECODE_ORDER`] and taking the first success:
//!
//! 1. [`aead`] - AES-256-GCM over a JSON envelope (issued today)
//! 2. [`legacy`] - keystream obfuscation (still accepted on read)
//!
//! Every failure is reported as `None`. Callers cannot tell a malformed
//! token from a wrong key or a tampered tag, and neither can anyone probing
//! the image endpoint.
//!
//! # Key Rotation
//!
//! [`ImageCipher`] seals with its current secret and opens with the current
//! secret first, then each previous secret in order.

pub mod aead;
pub mod legacy;

use core::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// Errors from building an [`ImageCipher`] or sealing a URL.
///
/// Opening a token never errors; it returns `None`.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ImageCipherError {
    /// A configured secret is empty.
    #[error("image token secret cannot be empty")]
    EmptySecret,
    /// The URL could not be sealed.
    #[error("failed to seal image URL")]
    Seal,
}

/// Derive the 256-bit symmetric key for `secret`.
fn derive_key(secret: &str) -> [u8; 32] {
    let digest = Sha256::digest(secret.as_bytes());
    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    key
}

/// Decode a base64url token into bytes.
///
/// Accepts padded tokens and tokens in the standard `+`/`/` alphabet, which
/// older links sometimes carry after passing through other tools.
fn decode_token(token: &str) -> Option<Vec<u8>> {
    let normalized: String = token
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    URL_SAFE_NO_PAD.decode(normalized).ok()
}

/// A token format the storefront knows how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenScheme {
    /// AES-256-GCM, see [`aead`].
    AesGcm,
    /// Keystream obfuscation, see [`legacy`].
    Legacy,
}

impl TokenScheme {
    /// Order in which schemes are tried when opening a token.
    pub const DECODE_ORDER: [Self; 2] = [Self::AesGcm, Self::Legacy];

    /// Try to open `token` under `secret` with this scheme.
    #[must_use]
    pub fn open(self, token: &str, secret: &str) -> Option<String> {
        match self {
            Self::AesGcm => aead::open(token, secret),
            Self::Legacy => legacy::decode(token, secret),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AesGcm => "aes-gcm",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for TokenScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encrypt `url` under `secret` with the current scheme.
///
/// # Errors
///
/// Returns [`ImageCipherError::Seal`] if encryption fails.
pub fn encrypt(url: &str, secret: &str) -> Result<String, ImageCipherError> {
    aead::seal(url, secret)
}

/// Open `token` under `secret`, trying every scheme in priority order.
///
/// ```
/// use campus_merch_core::image_token::{decrypt, encrypt, legacy};
///
/// let secret = "correct horse battery staple";
/// let url = "https://storage.example.com/slips/42.jpg";
///
/// let token = encrypt(url, secret).unwrap();
/// assert_eq!(decrypt(&token, secret).as_deref(), Some(url));
/// assert_eq!(decrypt(&token, "wrong"), None);
///
/// let old = legacy::encode(url, secret);
/// assert_eq!(decrypt(&old, secret).as_deref(), Some(url));
/// ```
#[must_use]
pub fn decrypt(token: &str, secret: &str) -> Option<String> {
    decrypt_with_scheme(token, secret).map(|(url, _)| url)
}

/// Like [`decrypt`], also reporting which scheme succeeded.
#[must_use]
pub fn decrypt_with_scheme(token: &str, secret: &str) -> Option<(String, TokenScheme)> {
    TokenScheme::DECODE_ORDER
        .iter()
        .find_map(|scheme| scheme.open(token, secret).map(|url| (url, *scheme)))
}

/// A successfully opened token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedToken {
    /// The storage URL the token points at.
    pub url: String,
    /// Scheme the token was issued with.
    pub scheme: TokenScheme,
    /// Whether a previous (rotated-out) secret opened the token.
    pub rotated_key: bool,
}

impl OpenedToken {
    /// Whether the token should be reissued under the current scheme and key.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.rotated_key || self.scheme != TokenScheme::AesGcm
    }
}

/// Image token cipher holding the current secret and any retired ones.
///
/// Implements `Debug` manually to redact secrets.
#[derive(Clone)]
pub struct ImageCipher {
    current: SecretString,
    previous: Vec<SecretString>,
}

impl ImageCipher {
    /// Create a cipher with a single current secret.
    ///
    /// # Errors
    ///
    /// Returns [`ImageCipherError::EmptySecret`] if `secret` is empty.
    pub fn new(secret: SecretString) -> Result<Self, ImageCipherError> {
        if secret.expose_secret().is_empty() {
            return Err(ImageCipherError::EmptySecret);
        }
        Ok(Self {
            current: secret,
            previous: Vec::new(),
        })
    }

    /// Accept tokens issued under retired secrets, tried in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`ImageCipherError::EmptySecret`] if any secret is empty.
    pub fn with_previous<I>(mut self, secrets: I) -> Result<Self, ImageCipherError>
    where
        I: IntoIterator<Item = SecretString>,
    {
        for secret in secrets {
            if secret.expose_secret().is_empty() {
                return Err(ImageCipherError::EmptySecret);
            }
            self.previous.push(secret);
        }
        Ok(self)
    }

    /// Number of retired secrets still accepted.
    #[must_use]
    pub fn previous_count(&self) -> usize {
        self.previous.len()
    }

    /// Seal `url` under the current secret and scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ImageCipherError::Seal`] if encryption fails.
    pub fn seal(&self, url: &str) -> Result<String, ImageCipherError> {
        aead::seal(url, self.current.expose_secret())
    }

    /// Open `token`, returning the storage URL or `None`.
    #[must_use]
    pub fn open(&self, token: &str) -> Option<String> {
        self.open_detailed(token).map(|opened| opened.url)
    }

    /// Open `token`, reporting which scheme and key succeeded.
    #[must_use]
    pub fn open_detailed(&self, token: &str) -> Option<OpenedToken> {
        let keys = core::iter::once(&self.current).chain(self.previous.iter());

        for (index, secret) in keys.enumerate() {
            if let Some((url, scheme)) = decrypt_with_scheme(token, secret.expose_secret()) {
                let opened = OpenedToken {
                    url,
                    scheme,
                    rotated_key: index > 0,
                };
                if opened.is_stale() {
                    tracing::debug!(
                        scheme = %scheme,
                        key_index = index,
                        "image token opened with a retired scheme or key"
                    );
                }
                return Some(opened);
            }
        }

        None
    }
}

impl fmt::Debug for ImageCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageCipher")
            .field("current", &"[REDACTED]")
            .field("previous", &format!("[{} REDACTED]", self.previous.len()))
            .finish()
    }
}

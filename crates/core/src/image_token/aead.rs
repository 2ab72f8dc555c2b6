//! Current token scheme: AES-256-GCM over a JSON envelope.
//!
//! # Token Format
//!
//! ```text
//! base64url_nopad( [12 bytes nonce][N bytes ciphertext][16 bytes auth tag] )
//! ```
//!
//! The key is `SHA-256(secret)`. The plaintext is `{"url": "..."}` so new
//! fields (an expiry, a size hint) can be added later without changing the
//! wire format; unknown fields are ignored on open.

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{ImageCipherError, decode_token, derive_key};

/// Size of the nonce in bytes (96 bits for GCM).
pub const NONCE_SIZE: usize = 12;

/// Size of the authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

#[derive(Serialize, Deserialize)]
struct Envelope {
    url: String,
}

fn cipher_for(secret: &str) -> Aes256Gcm {
    let key = derive_key(secret);
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key))
}

/// Encrypt `url` under `secret` with a fresh random nonce.
///
/// # Errors
///
/// Returns [`ImageCipherError::Seal`] if the envelope cannot be serialized
/// or the cipher rejects the input.
pub fn seal(url: &str, secret: &str) -> Result<String, ImageCipherError> {
    let plaintext = serde_json::to_vec(&Envelope {
        url: url.to_owned(),
    })
    .map_err(|_| ImageCipherError::Seal)?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::rng().fill_bytes(&mut nonce_bytes);

    // The returned buffer is ciphertext followed by the 16-byte tag.
    let sealed = cipher_for(secret)
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_slice())
        .map_err(|_| ImageCipherError::Seal)?;

    let mut token = Vec::with_capacity(NONCE_SIZE + sealed.len());
    token.extend_from_slice(&nonce_bytes);
    token.extend_from_slice(&sealed);

    Ok(URL_SAFE_NO_PAD.encode(token))
}

/// Decrypt a token produced by [`seal`].
///
/// Returns `None` for anything that is not a valid token under `secret`:
/// bad base64, a buffer too short to hold nonce and tag, a tag mismatch, or
/// an envelope that is not the expected JSON.
#[must_use]
pub fn open(token: &str, secret: &str) -> Option<String> {
    let bytes = decode_token(token)?;
    if bytes.len() < NONCE_SIZE + TAG_SIZE {
        return None;
    }

    let (nonce, sealed) = bytes.split_at(NONCE_SIZE);
    let plaintext = cipher_for(secret)
        .decrypt(Nonce::from_slice(nonce), sealed)
        .ok()?;

    let envelope: Envelope = serde_json::from_slice(&plaintext).ok()?;
    Some(envelope.url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const SECRET: &str = "k9#Vq2$wLp7!zR4@tY8^mN3&bX6*cJ1%";
    const URL: &str = "https://storage.example.com/slips/2025/order-0042.jpg";

    #[test]
    fn test_seal_open_roundtrip() {
        let token = seal(URL, SECRET).unwrap();
        assert_eq!(open(&token, SECRET).as_deref(), Some(URL));
    }

    #[test]
    fn test_token_is_url_safe() {
        for _ in 0..32 {
            let token = seal(URL, SECRET).unwrap();
            assert!(
                token
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
                "token {token} is not URL-safe"
            );
        }
    }

    #[test]
    fn test_token_layout() {
        let token = seal(URL, SECRET).unwrap();
        let bytes = URL_SAFE_NO_PAD.decode(token).unwrap();
        let envelope_len = serde_json::to_vec(&Envelope {
            url: URL.to_owned(),
        })
        .unwrap()
        .len();
        assert_eq!(bytes.len(), NONCE_SIZE + envelope_len + TAG_SIZE);
    }

    #[test]
    fn test_nonce_is_fresh() {
        let a = seal(URL, SECRET).unwrap();
        let b = seal(URL, SECRET).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = seal(URL, SECRET).unwrap();
        assert_eq!(open(&token, "a-different-secret"), None);
    }

    #[test]
    fn test_every_byte_flip_fails() {
        let token = seal(URL, SECRET).unwrap();
        let bytes = URL_SAFE_NO_PAD.decode(&token).unwrap();
        for i in 0..bytes.len() {
            let mut tampered = bytes.clone();
            tampered[i] ^= 0x01;
            let tampered = URL_SAFE_NO_PAD.encode(tampered);
            assert_eq!(open(&tampered, SECRET), None, "flip at byte {i} accepted");
        }
    }

    #[test]
    fn test_truncated_token_fails() {
        let token = seal(URL, SECRET).unwrap();
        let bytes = URL_SAFE_NO_PAD.decode(&token).unwrap();
        let short = URL_SAFE_NO_PAD.encode(&bytes[..NONCE_SIZE + TAG_SIZE - 1]);
        assert_eq!(open(&short, SECRET), None);
    }

    #[test]
    fn test_non_json_plaintext_fails() {
        let cipher = cipher_for(SECRET);
        let nonce = [7u8; NONCE_SIZE];
        let sealed = cipher
            .encrypt(Nonce::from_slice(&nonce), b"not json".as_slice())
            .unwrap();
        let mut bytes = nonce.to_vec();
        bytes.extend_from_slice(&sealed);
        assert_eq!(open(&URL_SAFE_NO_PAD.encode(bytes), SECRET), None);
    }

    #[test]
    fn test_extra_envelope_fields_are_ignored() {
        let cipher = cipher_for(SECRET);
        let nonce = [9u8; NONCE_SIZE];
        let plaintext = format!(r#"{{"url":"{URL}","exp":1767225600}}"#);
        let sealed = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .unwrap();
        let mut bytes = nonce.to_vec();
        bytes.extend_from_slice(&sealed);
        assert_eq!(
            open(&URL_SAFE_NO_PAD.encode(bytes), SECRET).as_deref(),
            Some(URL)
        );
    }

    #[test]
    fn test_garbage_fails() {
        assert_eq!(open("", SECRET), None);
        assert_eq!(open("!!!not base64!!!", SECRET), None);
        assert_eq!(open("AAAA", SECRET), None);
    }
}

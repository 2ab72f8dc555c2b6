//! Legacy token scheme: keystream obfuscation without authentication.
//!
//! Tokens issued before the AES-GCM scheme are the raw URL XORed with a
//! SHA-256 counter-mode keystream derived from the secret, then base64url
//! encoded without padding. There is no tag, so a decode is only accepted
//! when the result is an absolute `http`/`https` URL.
//!
//! The scheme is malleable. Flipping bits in a token flips the same bits in
//! the decoded URL, so an edited token can still open to a different valid
//! URL. Only AES-GCM tokens detect tampering.
//!
//! New tokens are never issued in this format by the storefront. [`encode`]
//! exists so that old links can be reproduced in tests and by the CLI.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
use url::Url;

use super::decode_token;

/// XOR `data` in place with the keystream for `secret`.
///
/// Block `i` of the keystream is `SHA-256(secret || i as u32 big-endian)`.
fn apply_keystream(data: &mut [u8], secret: &str) {
    for (counter, chunk) in (0u32..).zip(data.chunks_mut(32)) {
        let block = Sha256::new()
            .chain_update(secret.as_bytes())
            .chain_update(counter.to_be_bytes())
            .finalize();
        for (byte, key) in chunk.iter_mut().zip(block.iter()) {
            *byte ^= key;
        }
    }
}

/// Produce a legacy token for `url`.
#[must_use]
pub fn encode(url: &str, secret: &str) -> String {
    let mut bytes = url.as_bytes().to_vec();
    apply_keystream(&mut bytes, secret);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Recover the URL from a legacy token, or `None` if the token does not
/// decode to an absolute `http`/`https` URL under `secret`.
#[must_use]
pub fn decode(token: &str, secret: &str) -> Option<String> {
    let mut bytes = decode_token(token)?;
    if bytes.is_empty() {
        return None;
    }
    apply_keystream(&mut bytes, secret);

    let candidate = String::from_utf8(bytes).ok()?;
    let parsed = Url::parse(&candidate).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(candidate)
}

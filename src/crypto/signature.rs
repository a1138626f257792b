//! Detached HMAC-SHA-256 signatures
//!
//! Binds an independent integrity check to the exact archive bytes, so a
//! verifier holding only the signing secret can confirm provenance without
//! ever being able to decrypt the payload.
//!
//! The secret is used directly as the HMAC key with no slow derivation:
//! callers are expected to supply a high-entropy signing secret. This is
//! unlike the encryption secret, which may be a human passphrase and goes
//! through scrypt.

use ring::hmac;

/// Compute the detached signature over the archive bytes.
///
/// Output is lowercase hex with no prefix, the only externally visible
/// encoding of this layer.
pub fn sign(archive: &[u8], secret: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    hex::encode(hmac::sign(&key, archive))
}

/// Check a detached signature against the archive bytes.
///
/// Returns `false` for any mismatch: wrong secret, altered archive, or a
/// truncated or non-hex signature string. Never panics or errors on a
/// well-formed-but-wrong signature. The comparison is constant time.
pub fn verify(archive: &[u8], signature: &str, secret: &str) -> bool {
    let expected = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    hmac::verify(&key, archive, &expected).is_ok()
}

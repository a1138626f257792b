//! scrypt key derivation
//!
//! Converts a human-supplied secret string into a 32-byte AES key. scrypt is
//! deliberately slow and memory-hard so weak secrets resist offline brute
//! force; a fast hash here would be a defect, not an optimization.

use crate::crypto::{KDF_SALT, KEY_SIZE};
use crate::error::{Error, Result};
use scrypt::Params;
use zeroize::Zeroizing;

/// scrypt cost parameters: N = 2^14, r = 8, p = 1. These are the same
/// standard defaults the original exporter used and must match on both sides
/// of an archive, so they are constants rather than configuration.
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Derive a 32-byte encryption key from a secret string.
///
/// Deterministic: the same secret always yields the same key, which is what
/// lets the import side reconstruct the key from the secret alone without
/// the key ever being stored. An empty secret is valid input; secret
/// strength policy belongs to the caller.
pub fn derive_key(secret: &str) -> Result<Zeroizing<[u8; KEY_SIZE]>> {
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_SIZE)
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;

    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    scrypt::scrypt(secret.as_bytes(), KDF_SALT, &params, &mut *key)
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;

    Ok(key)
}

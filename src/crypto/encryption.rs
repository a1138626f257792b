//! AES-256-GCM Encryption Implementation
//!
//! All payloads are encrypted using AES-256-GCM which provides:
//! - Confidentiality: Data is encrypted
//! - Integrity: Any tampering is detected
//! - Authentication: Verifies the data came from the key holder
//!
//! Unlike encrypt-then-MAC compositions, GCM gives both properties in one
//! primitive, so a bit flip anywhere in IV, tag, or ciphertext fails here.

use crate::crypto::{IV_SIZE, KEY_SIZE, TAG_SIZE};
use crate::error::{Error, Result};
use rand::RngCore;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};

/// Output of a single encryption call. The IV and tag are kept separate from
/// the ciphertext because the archive layout stores them at fixed offsets
/// ahead of it.
#[derive(Debug, Clone)]
pub struct EncryptedData {
    /// IV used for encryption (unique per call)
    pub iv: [u8; IV_SIZE],
    /// GCM authentication tag
    pub tag: [u8; TAG_SIZE],
    /// Ciphertext, same length as the plaintext
    pub ciphertext: Vec<u8>,
}

/// Encrypt data using AES-256-GCM with a fresh random IV.
///
/// IV reuse under GCM breaks both confidentiality and integrity, so the IV
/// is always drawn fresh from the thread RNG and never accepted as input.
pub fn encrypt(key: &[u8; KEY_SIZE], plaintext: &[u8]) -> Result<EncryptedData> {
    let unbound_key = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| Error::Encryption("Failed to create encryption key".to_string()))?;
    let sealing_key = LessSafeKey::new(unbound_key);

    let mut iv = [0u8; IV_SIZE];
    rand::thread_rng().fill_bytes(&mut iv);
    let nonce = Nonce::assume_unique_for_key(iv);

    // Encrypt in place, tag returned separately
    let mut in_out = plaintext.to_vec();
    let tag = sealing_key
        .seal_in_place_separate_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| Error::Encryption("Encryption failed".to_string()))?;

    let mut tag_bytes = [0u8; TAG_SIZE];
    tag_bytes.copy_from_slice(tag.as_ref());

    Ok(EncryptedData {
        iv,
        tag: tag_bytes,
        ciphertext: in_out,
    })
}

/// Decrypt data using AES-256-GCM.
///
/// Fails closed: a tag mismatch from a wrong key, altered ciphertext, IV, or
/// tag all surface as the same opaque [`Error::Integrity`], never as partial
/// plaintext. Wrong-secret and tampering are intentionally indistinguishable.
pub fn decrypt(
    key: &[u8; KEY_SIZE],
    iv: &[u8; IV_SIZE],
    tag: &[u8; TAG_SIZE],
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let unbound_key = UnboundKey::new(&AES_256_GCM, key).map_err(|_| Error::Integrity)?;
    let opening_key = LessSafeKey::new(unbound_key);
    let nonce = Nonce::assume_unique_for_key(*iv);

    // ring expects the tag appended to the ciphertext
    let mut in_out = Vec::with_capacity(ciphertext.len() + TAG_SIZE);
    in_out.extend_from_slice(ciphertext);
    in_out.extend_from_slice(tag);

    let plaintext = opening_key
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| Error::Integrity)?;

    Ok(plaintext.to_vec())
}

//! Export/import codec
//!
//! The public surface: turn a JSON-serializable value into a compressed,
//! encrypted archive plus a detached signature, and reverse the process.
//!
//! Archive layout (before compression):
//!
//! ```text
//! iv[12] ‖ authTag[16] ‖ ciphertext[N]
//! ```
//!
//! The whole buffer is then gzip-compressed, and the signature is an
//! HMAC-SHA-256 over the compressed bytes. Signature checking and decryption
//! are deliberately decoupled: a verifier-only role calls
//! [`crate::crypto::verify`] with the signing secret and never holds the
//! encryption secret.

use crate::compress;
use crate::crypto::{self, IV_SIZE, TAG_SIZE};
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Minimum decompressed archive size: IV plus tag with an empty ciphertext.
const MIN_ARCHIVE_SIZE: usize = IV_SIZE + TAG_SIZE;

/// Result of a single export call. Immutable value object; re-exporting the
/// same data produces an entirely new package with a fresh IV.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedExportPackage {
    /// gzip(iv ‖ tag ‖ ciphertext), the artifact to store or transmit.
    pub archive: Vec<u8>,
    /// Lowercase hex HMAC-SHA-256 over the archive bytes. Detached: travels
    /// alongside the archive, never embedded in it.
    pub signature: String,
    /// Base64 copy of the IV already embedded in the archive. Convenience
    /// for logging; not needed for decryption.
    pub iv: String,
    /// Base64 copy of the auth tag already embedded in the archive.
    pub auth_tag: String,
}

/// Serialize, encrypt, compress, and sign a value.
///
/// The encryption key is derived from `encryption_secret` via scrypt; the
/// signature is keyed directly with `signature_secret`. The two secrets are
/// independent: compromising one reveals nothing about the other.
pub fn export_data<T: Serialize>(
    data: &T,
    encryption_secret: &str,
    signature_secret: &str,
) -> Result<EncryptedExportPackage> {
    // Serialization failures surface before any cryptographic work
    let plaintext = serde_json::to_vec(data)?;

    let key = crypto::derive_key(encryption_secret)?;
    let encrypted = crypto::encrypt(&key, &plaintext)?;

    let mut buffer = Vec::with_capacity(MIN_ARCHIVE_SIZE + encrypted.ciphertext.len());
    buffer.extend_from_slice(&encrypted.iv);
    buffer.extend_from_slice(&encrypted.tag);
    buffer.extend_from_slice(&encrypted.ciphertext);

    let archive = compress::compress(&buffer)?;
    let signature = crypto::sign(&archive, signature_secret);

    Ok(EncryptedExportPackage {
        signature,
        iv: BASE64.encode(encrypted.iv),
        auth_tag: BASE64.encode(encrypted.tag),
        archive,
    })
}

/// Decompress, decrypt, and deserialize an archive produced by
/// [`export_data`].
///
/// Does NOT check the detached signature; compose [`crate::crypto::verify`]
/// before or after this call depending on your threat model. Fails closed on
/// every path: bad gzip, short buffer, tag mismatch, or unparseable
/// plaintext all return an error, never partial data. A wrong secret is
/// indistinguishable from tampering by design.
pub fn import_data<T: DeserializeOwned>(archive: &[u8], encryption_secret: &str) -> Result<T> {
    let buffer = compress::decompress(archive)?;
    if buffer.len() < MIN_ARCHIVE_SIZE {
        return Err(Error::MalformedArchive(format!(
            "decompressed to {} bytes, need at least {}",
            buffer.len(),
            MIN_ARCHIVE_SIZE
        )));
    }

    // Fixed offsets: iv[0..12], tag[12..28], ciphertext[28..]
    let mut iv = [0u8; IV_SIZE];
    iv.copy_from_slice(&buffer[..IV_SIZE]);
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&buffer[IV_SIZE..MIN_ARCHIVE_SIZE]);
    let ciphertext = &buffer[MIN_ARCHIVE_SIZE..];

    let key = crypto::derive_key(encryption_secret)?;
    let plaintext = crypto::decrypt(&key, &iv, &tag, ciphertext)?;

    Ok(serde_json::from_slice(&plaintext)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::verify;
    use serde_json::{json, Value};

    const ENC_SECRET: &str = "export-encryption-key";
    const SIG_SECRET: &str = "export-signature-key";

    fn sample() -> Value {
        json!({
            "message": "invisible ink",
            "count": 8,
            "values": [0.5, 0.6, 0.7],
        })
    }

    #[test]
    fn test_roundtrip() {
        let data = sample();
        let pkg = export_data(&data, ENC_SECRET, SIG_SECRET).unwrap();
        let restored: Value = import_data(&pkg.archive, ENC_SECRET).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_signature_valid_after_export() {
        let pkg = export_data(&sample(), ENC_SECRET, SIG_SECRET).unwrap();
        assert!(verify(&pkg.archive, &pkg.signature, SIG_SECRET));
    }

    #[test]
    fn test_bad_signature_rejected_without_panic() {
        let pkg = export_data(&sample(), ENC_SECRET, SIG_SECRET).unwrap();
        assert!(!verify(&pkg.archive, "bad-signature", SIG_SECRET));
    }

    #[test]
    fn test_tampered_archive_fails_decrypt() {
        let pkg = export_data(&sample(), ENC_SECRET, SIG_SECRET).unwrap();

        // Flip one bit at the end, the middle, and the start of the archive
        for index in [pkg.archive.len() - 1, pkg.archive.len() / 2, 0] {
            let mut corrupted = pkg.archive.clone();
            corrupted[index] ^= 0x01;
            let result: Result<Value> = import_data(&corrupted, ENC_SECRET);
            assert!(result.is_err(), "bit flip at byte {} was not detected", index);
        }
    }

    #[test]
    fn test_tampered_archive_fails_signature() {
        let pkg = export_data(&sample(), ENC_SECRET, SIG_SECRET).unwrap();
        let mut corrupted = pkg.archive.clone();
        *corrupted.last_mut().unwrap() ^= 0x01;
        assert!(!verify(&corrupted, &pkg.signature, SIG_SECRET));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pkg = export_data(&sample(), ENC_SECRET, SIG_SECRET).unwrap();
        let result: Result<Value> = import_data(&pkg.archive, "wrong-secret");
        assert!(matches!(result, Err(Error::Integrity)));
    }

    #[test]
    fn test_empty_object_roundtrips() {
        let data = json!({});
        let pkg = export_data(&data, ENC_SECRET, SIG_SECRET).unwrap();
        let restored: Value = import_data(&pkg.archive, ENC_SECRET).unwrap();
        assert_eq!(restored, json!({}));
    }

    #[test]
    fn test_top_level_array_roundtrips() {
        let data = json!([1, 2, 3]);
        let pkg = export_data(&data, ENC_SECRET, SIG_SECRET).unwrap();
        let restored: Value = import_data(&pkg.archive, ENC_SECRET).unwrap();
        assert_eq!(restored, json!([1, 2, 3]));
    }

    #[test]
    fn test_typed_struct_roundtrips() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Report {
            name: String,
            scores: Vec<u32>,
            active: bool,
        }

        let data = Report {
            name: "quarterly".to_string(),
            scores: vec![90, 85, 99],
            active: true,
        };
        let pkg = export_data(&data, ENC_SECRET, SIG_SECRET).unwrap();
        let restored: Report = import_data(&pkg.archive, ENC_SECRET).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_fresh_iv_per_export() {
        let data = sample();
        let a = export_data(&data, ENC_SECRET, SIG_SECRET).unwrap();
        let b = export_data(&data, ENC_SECRET, SIG_SECRET).unwrap();
        assert_ne!(a.archive, b.archive);
        assert_ne!(a.signature, b.signature);
        assert_ne!(a.iv, b.iv);
    }

    #[test]
    fn test_convenience_fields_match_archive() {
        let pkg = export_data(&sample(), ENC_SECRET, SIG_SECRET).unwrap();
        let buffer = crate::compress::decompress(&pkg.archive).unwrap();
        assert_eq!(BASE64.encode(&buffer[..IV_SIZE]), pkg.iv);
        assert_eq!(BASE64.encode(&buffer[IV_SIZE..MIN_ARCHIVE_SIZE]), pkg.auth_tag);
    }

    #[test]
    fn test_not_gzip_rejected() {
        let result: Result<Value> = import_data(b"not a gzip archive", ENC_SECRET);
        assert!(matches!(result, Err(Error::MalformedArchive(_))));
    }

    #[test]
    fn test_too_short_archive_rejected() {
        // Valid gzip, but decompresses to fewer than 28 bytes
        let short = crate::compress::compress(&[0u8; 10]).unwrap();
        let result: Result<Value> = import_data(&short, ENC_SECRET);
        assert!(matches!(result, Err(Error::MalformedArchive(_))));
    }

    #[test]
    fn test_package_json_uses_camel_case() {
        let pkg = export_data(&sample(), ENC_SECRET, SIG_SECRET).unwrap();
        let text = serde_json::to_string(&pkg).unwrap();
        assert!(text.contains("\"authTag\""));
        assert!(text.contains("\"signature\""));
    }
}

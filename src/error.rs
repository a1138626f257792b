//! Error types for exportcrypt

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for exportcrypt
#[derive(Error, Debug)]
pub enum Error {
    /// The input value could not be serialized to JSON (or decrypted bytes
    /// failed to parse back). Distinct from the cryptographic failures so
    /// callers can correct their input and retry.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Authentication failure: wrong secret, or tampered ciphertext, IV, or
    /// tag. One collapsed category, so the error reveals nothing about which
    /// of those it was.
    #[error("Integrity check failed: archive corrupted or wrong secret")]
    Integrity,

    /// The archive is not valid gzip data, or decompresses to fewer bytes
    /// than the fixed IV/tag layout requires.
    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

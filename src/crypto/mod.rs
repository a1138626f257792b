//! Cryptography module for exportcrypt
//!
//! Provides AES-256-GCM authenticated encryption with scrypt key derivation,
//! plus detached HMAC-SHA-256 signatures over archive bytes.

mod encryption;
mod kdf;
mod signature;

pub use encryption::{decrypt, encrypt, EncryptedData};
pub use kdf::derive_key;
pub use signature::{sign, verify};

/// Size of AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of GCM initialization vector in bytes
pub const IV_SIZE: usize = 12;

/// Size of GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// Salt constant for key derivation. Part of the wire contract along with
/// the scrypt cost parameters: changing either makes existing archives
/// unreadable.
pub const KDF_SALT: &[u8] = b"export";

//! exportcrypt - compressed, encrypted, signed export archives
//!
//! Takes any JSON-serializable value and produces a gzip-compressed,
//! AES-256-GCM-encrypted archive plus a detached HMAC-SHA-256 signature. A
//! verifier holding only the signing secret can check authenticity without
//! being able to decrypt the payload.
//!
//! Every operation is a stateless, synchronous pure function: no sessions,
//! no caching of derived keys, no internal logging.

pub mod compress;
pub mod crypto;
pub mod error;
pub mod export;

pub use crypto::{sign, verify};
pub use error::{Error, Result};
pub use export::{export_data, import_data, EncryptedExportPackage};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::crypto::{sign, verify};
    pub use crate::error::{Error, Result};
    pub use crate::export::{export_data, import_data, EncryptedExportPackage};
}

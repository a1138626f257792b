//! gzip compression layer
//!
//! The archive wire format is RFC 1952 gzip, so any compliant implementation
//! in any language can decompress what another produces. Everything here
//! operates on raw bytes; no text-mode translation anywhere.

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Compress a buffer with gzip at the default level.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress a gzip buffer.
///
/// Anything that is not valid gzip data (tampered, truncated, or plain
/// garbage) is rejected as a malformed archive; no partial recovery.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::MalformedArchive(e.to_string()))?;
    Ok(out)
}

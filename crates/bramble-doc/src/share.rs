#![forbid(unsafe_code)]

//! URL-safe share strings.
//!
//! A document compresses into a string that survives a URL hash fragment:
//! JSON, DEFLATE, then URL-safe base64 without padding (no `+`, `/`, `=`).
//! Decoding is total — anything that is not a valid share string comes
//! back as `None`, so a mangled link prompts the user instead of crashing
//! the editor.

use std::io::{Read, Write};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use tracing::debug;

use crate::file::MapFile;

/// Decompressed size cap: a decoy share string must not balloon memory.
const MAX_DECODED_BYTES: u64 = 16 * 1024 * 1024;

/// Encode a document as a URL-safe share string.
#[must_use]
pub fn encode_share(file: &MapFile) -> String {
    let json = match serde_json::to_vec(file) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(%err, "share encoding failed to serialize");
            return String::new();
        }
    };
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    let deflated = match encoder.write_all(&json).and_then(|()| encoder.finish()) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(%err, "share encoding failed to compress");
            return String::new();
        }
    };
    URL_SAFE_NO_PAD.encode(deflated)
}

/// Decode a share string back into a document file.
///
/// Returns `None` for empty, corrupt, truncated, or oversized input.
#[must_use]
pub fn decode_share(share: &str) -> Option<MapFile> {
    if share.is_empty() {
        return None;
    }
    let deflated = URL_SAFE_NO_PAD.decode(share).ok()?;
    let mut json = Vec::new();
    let decoder = DeflateDecoder::new(deflated.as_slice());
    decoder
        .take(MAX_DECODED_BYTES)
        .read_to_end(&mut json)
        .ok()?;
    serde_json::from_slice(&json).ok()
}

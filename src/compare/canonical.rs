//! Byte-stable JSON canonicalization.
//!
//! [`JsonCanonicalizer`] produces RFC 8785 (JCS) output: no insignificant
//! whitespace, object members ordered by the UTF-16 code units of their keys,
//! numbers in ECMAScript shortest form.

use crate::error::{CompareError, CompareErrorKind, Result};
use serde_json::Value;
use xxhash_rust::xxh3::xxh3_64;

/// Turns a JSON document into a byte-stable canonical form.
pub trait Canonicalizer: Send + Sync {
    /// Canonicalize `document`. Fails on malformed JSON.
    fn canonicalize(&self, document: &[u8]) -> Result<Vec<u8>>;
}

/// RFC 8785 canonicalizer backed by `serde_json_canonicalizer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCanonicalizer;

impl Canonicalizer for JsonCanonicalizer {
    fn canonicalize(&self, document: &[u8]) -> Result<Vec<u8>> {
        let value: Value = serde_json::from_slice(document).map_err(canonicalization_error)?;
        serde_json_canonicalizer::to_vec(&value).map_err(canonicalization_error)
    }
}

fn canonicalization_error(err: serde_json::Error) -> CompareError {
    CompareError::compare(
        "canonicalizing document",
        CompareErrorKind::Canonicalization(err.to_string()),
    )
}

/// Short stable fingerprint of a canonical document.
#[must_use]
pub fn fingerprint(canonical: &[u8]) -> String {
    format!("{:016x}", xxh3_64(canonical))
}

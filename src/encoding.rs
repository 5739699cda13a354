//! Base64url encoding for query blobs
//!
//! The base64 mode of the URL builder packs the whole parameter set into a
//! single `bc` query key; the value is the URL-safe base64 alphabet
//! (`+` -> `-`, `/` -> `_`) with padding stripped by default.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;

use crate::error::UrlError;

/// Encode bytes as base64url.
///
/// Padding `=` characters are stripped unless `use_padding` is set.
pub fn base64url_encode(data: impl AsRef<[u8]>, use_padding: bool) -> String {
    if use_padding {
        URL_SAFE.encode(data)
    } else {
        URL_SAFE_NO_PAD.encode(data)
    }
}

/// Decode base64url text, accepting both padded and unpadded input.
///
/// Returns [`UrlError::InvalidEncoding`] when the input is not valid
/// base64 under the URL-safe alphabet.
pub fn base64url_decode(data: &str) -> Result<Vec<u8>, UrlError> {
    // Normalize to the unpadded form so both encode() variants round-trip
    let unpadded = data.trim_end_matches('=');
    Ok(URL_SAFE_NO_PAD.decode(unpadded)?)
}

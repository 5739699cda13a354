//! Error types for URL building and sealing

use thiserror::Error;

/// Errors raised while validating inputs or serializing a URL.
///
/// Every variant is a synchronous validation or serialization failure
/// detected before the URL string is produced; there is no partial
/// success and nothing to retry.
#[derive(Error, Debug)]
pub enum UrlError {
    #[error("domain must be a fully-qualified domain name without a scheme or path element, e.g. \"example.domain.com\": {0}")]
    InvalidDomain(String),

    #[error("file id must be a valid UUID: {0}")]
    InvalidFileId(String),

    #[error("format must be 3-4 lowercase letters: {0}")]
    InvalidFormat(String),

    #[error("slug is not in canonical form: {0}")]
    InvalidSlug(String),

    #[error("parameter `s` (seal) is reserved")]
    ReservedParameterKey,

    #[error("failed to serialize parameters: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid base64url data: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
}

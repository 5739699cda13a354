//! Sealed media URL builder
//!
//! Builds URLs for retrieving media assets from a remote processing and
//! delivery service. Given a file id (UUID), an output format, and
//! optional transformation parameters, produces a URL of the form
//! `scheme://domain/v1[/slug]/fileID.format[?query]`, optionally sealed
//! with an HMAC-SHA256 signature and optionally with the whole query
//! packed into a single base64url `bc` parameter.
//!
//! ```
//! use sealurl::{Params, UrlBuilder};
//!
//! let builder = UrlBuilder::new("example.com", "secret", true).unwrap();
//! let mut params = Params::new();
//! params.insert("w".to_string(), 200.into());
//!
//! let url = builder
//!     .create_url("123e4567-e89b-12d3-a456-426614174000", "png", params, "")
//!     .unwrap();
//! assert!(url.starts_with("https://example.com/v1/"));
//! ```

pub mod assembler;
pub mod builder;
pub mod encoding;
pub mod error;
pub mod query;
pub mod seal;

pub use assembler::UrlAssembler;
pub use builder::UrlBuilder;
pub use encoding::{base64url_decode, base64url_encode};
pub use error::UrlError;
pub use seal::seal;

/// Parameter values accepted by the builder: scalars, arrays, and maps.
pub use serde_json::Value;

/// Ordered parameter mapping. Backed by a sorted map, so query output and
/// seal canonicalization are deterministic regardless of insertion order.
pub type Params = serde_json::Map<String, Value>;

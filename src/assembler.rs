//! Per-call URL assembly
//!
//! A [`UrlAssembler`] is built fresh for every URL, validates its inputs
//! eagerly at construction, and is consumed when the URL string is
//! produced. Treat it as a single-use, single-owner value.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::encoding::base64url_encode;
use crate::error::UrlError;
use crate::query::build_query;
use crate::seal::{seal, SEAL_KEY};
use crate::Params;

/// Fixed API version path segment.
const API_VERSION: &str = "v1";

/// Query key holding the base64url-encoded parameter blob in base64 mode.
const BLOB_KEY: &str = "bc";

static FILE_ID_PATTERN: OnceLock<Regex> = OnceLock::new();
static FORMAT_PATTERN: OnceLock<Regex> = OnceLock::new();
static SLUG_STRIP_PATTERN: OnceLock<Regex> = OnceLock::new();
static SLUG_COLLAPSE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// UUID v1-v5, RFC 4122 variant (hex groups 8-4-4-4-12).
fn file_id_pattern() -> &'static Regex {
    FILE_ID_PATTERN.get_or_init(|| {
        Regex::new(
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-5][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$",
        )
        .expect("file id pattern is a compile-time constant")
    })
}

fn format_pattern() -> &'static Regex {
    FORMAT_PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z]{3,4}$").expect("format pattern is a compile-time constant")
    })
}

fn slug_strip_pattern() -> &'static Regex {
    SLUG_STRIP_PATTERN.get_or_init(|| {
        Regex::new(r"[^\w\s-]").expect("slug strip pattern is a compile-time constant")
    })
}

fn slug_collapse_pattern() -> &'static Regex {
    SLUG_COLLAPSE_PATTERN.get_or_init(|| {
        Regex::new(r"[\s_-]+").expect("slug collapse pattern is a compile-time constant")
    })
}

/// Assembles a single media URL from validated parts.
#[derive(Debug, Clone)]
pub struct UrlAssembler {
    domain: String,
    file_id: String,
    format: String,
    slug: String,
    secret_key: String,
    scheme: String,
    use_base64: bool,
    params: Params,
}

impl UrlAssembler {
    /// Create an assembler, validating `file_id`, `format`, and `slug`
    /// eagerly. Defaults to https, no secret key, no base64 mode, and an
    /// empty parameter set; use the `with_*` methods to override.
    pub fn new(
        domain: impl Into<String>,
        file_id: &str,
        format: &str,
        slug: &str,
    ) -> Result<Self, UrlError> {
        Ok(Self {
            domain: domain.into(),
            file_id: validate_file_id(file_id)?,
            format: validate_format(format)?,
            slug: validate_slug(slug)?,
            secret_key: String::new(),
            scheme: "https".to_string(),
            use_base64: false,
            params: Params::new(),
        })
    }

    /// Set the sealing key. An empty key leaves the URL unsealed.
    pub fn with_secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = key.into();
        self
    }

    pub fn with_https(mut self, use_https: bool) -> Self {
        self.scheme = if use_https { "https" } else { "http" }.to_string();
        self
    }

    pub fn with_base64(mut self, use_base64: bool) -> Self {
        self.use_base64 = use_base64;
        self
    }

    /// Replace the parameter set wholesale.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Set a transformation parameter.
    ///
    /// A non-empty value, or a numeric zero, is stored. Any other falsy
    /// value (null, `false`, empty string, empty array/object) removes the
    /// key instead, so callers can unset a parameter by passing an empty
    /// value. The zero exception is deliberate: `w=0` style parameters are
    /// observable and must survive.
    pub fn set_parameter(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if !key.is_empty() && keeps_parameter(&value) {
            self.params.insert(key.to_string(), value);
        } else {
            self.params.remove(key);
        }
    }

    /// Remove a parameter unconditionally. No-op when absent.
    pub fn delete_parameter(&mut self, key: &str) {
        self.params.remove(key);
    }

    /// Serialize the final URL, sealing and encoding the parameters as
    /// configured.
    pub fn url(&self) -> Result<String, UrlError> {
        let mut query = String::new();

        if !self.params.is_empty() {
            if self.params.contains_key(SEAL_KEY) {
                return Err(UrlError::ReservedParameterKey);
            }

            let mut params = self.params.clone();

            if !self.secret_key.is_empty() {
                let sealed = seal(&params, &self.secret_key)?;
                params.insert(SEAL_KEY.to_string(), Value::String(sealed));
            }

            if self.use_base64 {
                let blob = serde_json::to_string(&params)?;
                let mut encoded = Params::new();
                encoded.insert(
                    BLOB_KEY.to_string(),
                    Value::String(base64url_encode(blob, false)),
                );
                params = encoded;
            }

            query = format!("?{}", build_query(&params));
        }

        let slug_segment = if self.slug.is_empty() {
            String::new()
        } else {
            format!("/{}", self.slug)
        };

        let url = format!(
            "{}://{}/{}{}/{}.{}{}",
            self.scheme, self.domain, API_VERSION, slug_segment, self.file_id, self.format, query
        );

        debug!(
            file_id = %self.file_id,
            format = %self.format,
            sealed = !self.secret_key.is_empty(),
            base64 = self.use_base64,
            "assembled media url"
        );

        Ok(url)
    }
}

/// Whether `set_parameter` stores the value (as opposed to removing the key).
fn keeps_parameter(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Bool(true) => true,
        // Numeric zero is kept, unlike the other falsy values
        Value::Number(_) => true,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Validate a file id as a UUID (version 1-5, RFC 4122 variant).
pub fn validate_file_id(file_id: &str) -> Result<String, UrlError> {
    if !file_id_pattern().is_match(file_id) {
        return Err(UrlError::InvalidFileId(file_id.to_string()));
    }
    Ok(file_id.to_string())
}

/// Validate an output format (3-4 lowercase letters).
pub fn validate_format(format: &str) -> Result<String, UrlError> {
    if !format_pattern().is_match(format) {
        return Err(UrlError::InvalidFormat(format.to_string()));
    }
    Ok(format.to_string())
}

/// Validate a slug by requiring it to already be in canonical form.
///
/// This is a check, not an auto-fix: the original input is returned
/// unchanged when it matches its own canonicalization, and rejected
/// otherwise. The empty slug is valid (and omitted from the path).
pub fn validate_slug(slug: &str) -> Result<String, UrlError> {
    if canonicalize_slug(slug) != slug {
        return Err(UrlError::InvalidSlug(slug.to_string()));
    }
    Ok(slug.to_string())
}

/// Canonicalize arbitrary text into slug form: lowercase, trim, strip
/// everything but word characters, whitespace, and hyphens, collapse runs
/// of whitespace/underscores/hyphens into a single hyphen, and trim
/// leading/trailing hyphens.
pub fn canonicalize_slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let trimmed = lowered.trim();
    let stripped = slug_strip_pattern().replace_all(trimmed, "");
    let collapsed = slug_collapse_pattern().replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

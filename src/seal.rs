//! Seal (HMAC-SHA256 signature) computation over canonicalized parameters
//!
//! The seal covers a canonical byte string built from the parameter set:
//! keys sorted ascending by byte order, each rendered as `key=value` and
//! concatenated with no separator. Composite values are substituted by
//! their compact JSON serialization before concatenation.

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;

use crate::error::UrlError;
use crate::Params;

type HmacSha256 = Hmac<Sha256>;

/// Reserved query key the seal is stored under.
pub const SEAL_KEY: &str = "s";

/// Compute the seal for a parameter set.
///
/// Pure function of `(params, secret_key)`: insertion order never matters
/// because keys are sorted before concatenation. Returns the digest as
/// 64 lowercase hex characters.
pub fn seal(params: &Params, secret_key: &str) -> Result<String, UrlError> {
    let mut entries: Vec<(&String, &Value)> = params.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut material = String::new();
    for (key, value) in entries {
        material.push_str(key);
        material.push('=');
        match value {
            Value::Array(_) | Value::Object(_) => {
                material.push_str(&serde_json::to_string(value)?);
            }
            scalar => material.push_str(&render_scalar(scalar)),
        }
    }

    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(material.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Render a scalar parameter value as query/seal text.
///
/// Follows the delivery service's string conversion rules: strings pass
/// through unchanged, numbers use their JSON text, `true` becomes `1`,
/// and `false`/`null` become the empty string.
pub(crate) fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        // Both call sites serialize composite values as JSON before
        // rendering, so only scalars can reach this match
        Value::Array(_) | Value::Object(_) => {
            unreachable!("composite values are serialized by the caller")
        }
    }
}

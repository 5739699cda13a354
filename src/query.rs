//! Query string serialization
//!
//! Builds an `&`-joined, percent-encoded query from a parameter mapping.
//! Nested arrays and objects use bracket notation (`crop%5B0%5D=10`),
//! matching what PHP's `http_build_query` produces so standard decoders
//! round-trip the values.

use serde_json::Value;

use crate::seal::render_scalar;
use crate::Params;

/// Serialize a parameter mapping into a query string (no leading `?`).
pub fn build_query(params: &Params) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        append_pairs(&urlencoding::encode(key), value, &mut pairs);
    }
    pairs.join("&")
}

fn append_pairs(prefix: &str, value: &Value, pairs: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                append_pairs(&format!("{prefix}%5B{index}%5D"), item, pairs);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                let child = format!("{prefix}%5B{}%5D", urlencoding::encode(key));
                append_pairs(&child, item, pairs);
            }
        }
        scalar => {
            let encoded = urlencoding::encode(&render_scalar(scalar)).into_owned();
            pairs.push(format!("{prefix}={encoded}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params_from(pairs: &[(&str, Value)]) -> Params {
        let mut params = Params::new();
        for (key, value) in pairs {
            params.insert((*key).to_string(), value.clone());
        }
        params
    }

    #[test]
    fn test_empty_params() {
        assert_eq!(build_query(&Params::new()), "");
    }

    #[test]
    fn test_scalar_params_sorted_by_key() {
        let params = params_from(&[("w", json!(200)), ("h", json!(200))]);
        assert_eq!(build_query(&params), "h=200&w=200");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let params = params_from(&[("t", json!("a b&c"))]);
        assert_eq!(build_query(&params), "t=a%20b%26c");
    }

    #[test]
    fn test_keys_are_percent_encoded() {
        let params = params_from(&[("a key", json!(1))]);
        assert_eq!(build_query(&params), "a%20key=1");
    }

    #[test]
    fn test_nested_array_uses_bracket_notation() {
        let params = params_from(&[("crop", json!([10, 20]))]);
        assert_eq!(build_query(&params), "crop%5B0%5D=10&crop%5B1%5D=20");
    }

    #[test]
    fn test_nested_object_uses_bracket_notation() {
        let params = params_from(&[("fit", json!({"mode": "cover"}))]);
        assert_eq!(build_query(&params), "fit%5Bmode%5D=cover");
    }

    #[test]
    fn test_deeply_nested_values() {
        let params = params_from(&[("f", json!({"box": [1, 2]}))]);
        assert_eq!(build_query(&params), "f%5Bbox%5D%5B0%5D=1&f%5Bbox%5D%5B1%5D=2");
    }

    #[test]
    fn test_bool_and_null_rendering() {
        let params = params_from(&[("a", json!(true)), ("b", json!(false)), ("c", Value::Null)]);
        assert_eq!(build_query(&params), "a=1&b=&c=");
    }
}

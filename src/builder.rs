//! URL builder configuration
//!
//! [`UrlBuilder`] holds the delivery domain, sealing key, and encoding
//! flags, and hands each `create_url` call off to a freshly constructed
//! [`UrlAssembler`]. The builder itself is cheap to keep around for the
//! lifetime of the application; mutating it from multiple threads needs
//! external synchronization.

use crate::assembler::UrlAssembler;
use crate::error::UrlError;
use crate::Params;

/// Maximum number of labels preceding the inner and final labels.
const MAX_LEADING_LABELS: usize = 125;

/// Fully-qualified domain: 0-125 leading labels of 1-62 word characters or
/// hyphens, one inner label with no leading/trailing hyphen, and a final
/// label of 1-63 alphanumerics. Case-insensitive; no scheme, no path.
///
/// Validated label by label: the counted-repetition form of this pattern
/// exceeds the regex crate's compiled-size limit.
fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let (leading, tail) = labels.split_at(labels.len() - 2);
    leading.len() <= MAX_LEADING_LABELS
        && leading.iter().all(|label| is_leading_label(label))
        && is_inner_label(tail[0])
        && is_final_label(tail[1])
}

fn is_leading_label(label: &str) -> bool {
    (1..=62).contains(&label.len())
        && label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn is_inner_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    (1..=63).contains(&bytes.len())
        && bytes.first().is_some_and(|b| b.is_ascii_alphanumeric())
        && bytes.last().is_some_and(|b| b.is_ascii_alphanumeric())
        && bytes.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'-')
}

fn is_final_label(label: &str) -> bool {
    (1..=63).contains(&label.len()) && label.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Configuration for building sealed media URLs.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    domain: String,
    secret_key: String,
    use_https: bool,
    use_base64: bool,
}

impl UrlBuilder {
    /// Create a builder for `domain`, validating it as a fully-qualified
    /// domain name. An empty `secret_key` produces unsealed URLs.
    pub fn new(
        domain: impl Into<String>,
        secret_key: impl Into<String>,
        use_https: bool,
    ) -> Result<Self, UrlError> {
        let domain = domain.into();
        if !is_valid_domain(&domain) {
            return Err(UrlError::InvalidDomain(domain));
        }
        Ok(Self {
            domain,
            secret_key: secret_key.into(),
            use_https,
            use_base64: false,
        })
    }

    /// Create an unsealed https builder for `domain`.
    pub fn with_domain(domain: impl Into<String>) -> Result<Self, UrlError> {
        Self::new(domain, "", true)
    }

    pub fn set_secret_key(&mut self, key: impl Into<String>) {
        self.secret_key = key.into();
    }

    pub fn set_use_https(&mut self, use_https: bool) {
        self.use_https = use_https;
    }

    /// Enable or disable base64 mode. Chainable for fluent reconfiguration.
    pub fn set_use_base64(&mut self, use_base64: bool) -> &mut Self {
        self.use_base64 = use_base64;
        self
    }

    /// Build a URL for `file_id`, validating every field and applying the
    /// configured sealing and encoding.
    pub fn create_url(
        &self,
        file_id: &str,
        format: &str,
        params: Params,
        slug: &str,
    ) -> Result<String, UrlError> {
        UrlAssembler::new(&self.domain, file_id, format, slug)?
            .with_secret_key(&self.secret_key)
            .with_https(self.use_https)
            .with_base64(self.use_base64)
            .with_params(params)
            .url()
    }

    /// Build a URL with the default format (`png`), no parameters, and no
    /// slug.
    pub fn create_simple_url(&self, file_id: &str) -> Result<String, UrlError> {
        self.create_url(file_id, "png", Params::new(), "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[test]
    fn test_valid_domains() {
        for domain in [
            "example.com",
            "example.domain.com",
            "sub_domain.example.com",
            "a.b",
            "cdn-1.media.example.co.uk",
            "Example.COM",
        ] {
            assert!(UrlBuilder::with_domain(domain).is_ok(), "{domain}");
        }
    }

    #[test]
    fn test_invalid_domains() {
        for domain in [
            "",
            "example",
            "http://example.com",
            "example.com/path",
            "example.com/",
            ".example.com",
            "example..com",
            "example.-bad.com",
            "example .com",
        ] {
            assert!(
                matches!(
                    UrlBuilder::with_domain(domain),
                    Err(UrlError::InvalidDomain(_))
                ),
                "{domain}"
            );
        }
    }

    #[test]
    fn test_domain_label_count_and_length_limits() {
        // 125 leading labels + inner + final is the maximum accepted shape
        let max = format!("{}example.com", "a.".repeat(125));
        assert!(UrlBuilder::with_domain(&max).is_ok());

        let over = format!("{}example.com", "a.".repeat(126));
        assert!(matches!(
            UrlBuilder::with_domain(&over),
            Err(UrlError::InvalidDomain(_))
        ));

        let long_leading = format!("{}.example.com", "a".repeat(62));
        assert!(UrlBuilder::with_domain(&long_leading).is_ok());

        let too_long_leading = format!("{}.example.com", "a".repeat(63));
        assert!(matches!(
            UrlBuilder::with_domain(&too_long_leading),
            Err(UrlError::InvalidDomain(_))
        ));

        let long_final = format!("example.{}", "a".repeat(63));
        assert!(UrlBuilder::with_domain(&long_final).is_ok());

        let too_long_final = format!("example.{}", "a".repeat(64));
        assert!(matches!(
            UrlBuilder::with_domain(&too_long_final),
            Err(UrlError::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_create_simple_url() {
        let builder = UrlBuilder::with_domain("example.com").unwrap();
        assert_eq!(
            builder.create_simple_url(FILE_ID).unwrap(),
            format!("https://example.com/v1/{FILE_ID}.png")
        );
    }

    #[test]
    fn test_set_use_https() {
        let mut builder = UrlBuilder::with_domain("example.com").unwrap();
        builder.set_use_https(false);
        let url = builder.create_simple_url(FILE_ID).unwrap();
        assert!(url.starts_with("http://example.com/"));
    }

    #[test]
    fn test_set_secret_key_reconfigures_sealing() {
        let mut builder = UrlBuilder::with_domain("example.com").unwrap();
        let mut params = Params::new();
        params.insert("w".to_string(), 200.into());

        let unsealed = builder
            .create_url(FILE_ID, "png", params.clone(), "")
            .unwrap();
        assert!(!unsealed.contains("s="));

        builder.set_secret_key("secret");
        let sealed = builder.create_url(FILE_ID, "png", params, "").unwrap();
        // HMAC-SHA256("w=200", "secret"); `s` sorts before `w` in the query
        assert_eq!(
            sealed,
            format!(
                "https://example.com/v1/{FILE_ID}.png\
                 ?s=e47a78d6ad1b42373b11f4363a5a65f10fa94307ae813f50b80e64ad5cf65485&w=200"
            )
        );
    }

    #[test]
    fn test_set_use_base64_is_chainable() {
        let mut builder = UrlBuilder::with_domain("example.com").unwrap();
        let mut params = Params::new();
        params.insert("w".to_string(), 200.into());

        let url = builder
            .set_use_base64(true)
            .create_url(FILE_ID, "png", params, "")
            .unwrap();
        assert!(url.contains("?bc="));
    }

    #[test]
    fn test_create_url_propagates_validation_errors() {
        let builder = UrlBuilder::with_domain("example.com").unwrap();
        assert!(matches!(
            builder.create_url("nope", "png", Params::new(), ""),
            Err(UrlError::InvalidFileId(_))
        ));
        assert!(matches!(
            builder.create_url(FILE_ID, "PNG", Params::new(), ""),
            Err(UrlError::InvalidFormat(_))
        ));
        assert!(matches!(
            builder.create_url(FILE_ID, "png", Params::new(), "Bad Slug"),
            Err(UrlError::InvalidSlug(_))
        ));
    }
}

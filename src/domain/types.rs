//! Type-safe URL wrappers using the new-type pattern.
//!
//! Proxy and timestamp authority endpoints are validated once at construction
//! so the rest of the pipeline can treat them as known-good.

use std::fmt;
use std::str::FromStr;

use crate::infra::error::{SignError, SignResult};

/// Base URL of the caller-supplied forwarding proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyUrl(String);

impl ProxyUrl {
    /// Create a new `ProxyUrl` after validation.
    pub fn new(url: impl AsRef<str>) -> SignResult<Self> {
        let url = url.as_ref();
        validate_http_url(url, "Proxy URL")?;
        Ok(ProxyUrl(url.to_string()))
    }

    /// Get the URL as entered by the caller.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the base with any trailing slash removed, the form used when
    /// composing forwarding URLs.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.0.trim_end_matches('/')
    }

    /// Whether the caller-supplied base ends in a slash. Surfaced as a
    /// validation warning; the slash is trimmed when composing URLs.
    #[must_use]
    pub fn has_trailing_slash(&self) -> bool {
        self.0.ends_with('/')
    }
}

impl FromStr for ProxyUrl {
    type Err = SignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ProxyUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// URL of a timestamp authority endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsaUrl(String);

impl TsaUrl {
    /// Create a new `TsaUrl` after validation.
    pub fn new(url: impl AsRef<str>) -> SignResult<Self> {
        let url = url.as_ref();
        validate_http_url(url, "Timestamp authority URL")?;
        Ok(TsaUrl(url.to_string()))
    }

    /// Get the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TsaUrl {
    type Err = SignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for TsaUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that a URL is an absolute `http`/`https` URL with a host.
fn validate_http_url(url: &str, what: &str) -> SignResult<()> {
    let parsed = url::Url::parse(url).map_err(|e| SignError::InvalidOptions {
        message: format!("{what} is not a valid URL: {e}"),
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(SignError::InvalidOptions {
            message: format!(
                "{what} must use http or https, got: {}",
                parsed.scheme()
            ),
        });
    }

    if parsed.host_str().is_none() {
        return Err(SignError::InvalidOptions {
            message: format!("{what} must contain a host: {url}"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_url_validation() {
        let valid = [
            "https://my.proxy.com",
            "http://localhost:8080",
            "https://proxy.internal/api/",
        ];
        for url in valid {
            assert!(ProxyUrl::new(url).is_ok(), "URL should be valid: {url}");
        }

        let invalid = ["", "ftp://proxy.com", "not-a-url", "file:///tmp/x"];
        for url in invalid {
            assert!(ProxyUrl::new(url).is_err(), "URL should be invalid: {url}");
        }
    }

    #[test]
    fn proxy_url_trailing_slash() {
        let with_slash = ProxyUrl::new("https://my.proxy.com/").unwrap();
        assert!(with_slash.has_trailing_slash());
        assert_eq!(with_slash.trimmed(), "https://my.proxy.com");

        let without = ProxyUrl::new("https://my.proxy.com").unwrap();
        assert!(!without.has_trailing_slash());
        assert_eq!(without.trimmed(), "https://my.proxy.com");
    }

    #[test]
    fn tsa_url_validation() {
        assert!(TsaUrl::new("http://timestamp.digicert.com").is_ok());
        assert!(TsaUrl::new("wss://tsa.example.com").is_err());
        assert!(TsaUrl::new("").is_err());
    }
}

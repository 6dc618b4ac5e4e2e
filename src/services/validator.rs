//! Signing options validation service.
//!
//! Hard violations abort the signing call; warnings are surfaced to the
//! caller and never block execution.

use std::fmt;

use chrono::Utc;
use serde::Serialize;

use crate::domain::certificate::CertificateInfo;
use crate::domain::options::{SigningLevel, SigningRequestOptions};
use crate::infra::error::{SignError, SignResult};

/// Advisory finding attached to an otherwise valid request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub code: WarningCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningCode {
    SelfSignedLtv,
    ProxyTrailingSlash,
}

impl WarningCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WarningCode::SelfSignedLtv => "self-signed-ltv",
            WarningCode::ProxyTrailingSlash => "proxy-trailing-slash",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Successful validation outcome.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationWarning>,
}

pub struct OptionsValidator;

impl OptionsValidator {
    /// Run ordered checks against the requested options and the resolved
    /// certificate metadata. The first hard failure short-circuits.
    ///
    /// Certificate validity is re-evaluated against the current clock here
    /// rather than trusting the cached `is_expired` flag.
    pub fn validate(
        options: &SigningRequestOptions,
        metadata: &CertificateInfo,
    ) -> SignResult<ValidationReport> {
        if options.level == SigningLevel::Advanced && options.proxy.is_none() {
            return Err(SignError::ProxyRequired);
        }

        let now = Utc::now();
        if metadata.valid_to < now {
            return Err(SignError::CertificateExpired {
                valid_to: metadata.valid_to,
            });
        }
        if now < metadata.valid_from {
            return Err(SignError::CertificateNotYetValid {
                valid_from: metadata.valid_from,
            });
        }

        if let Some(visible) = &options.visible_signature {
            if visible.image.is_none() && visible.text.is_none() {
                return Err(SignError::InvalidOptions {
                    message: "Visible signature requires an image or text".to_string(),
                });
            }
        }

        let mut warnings = Vec::new();
        if metadata.is_self_signed && options.level == SigningLevel::Advanced {
            warnings.push(ValidationWarning {
                code: WarningCode::SelfSignedLtv,
                message: format!(
                    "Certificate '{}' is self-signed; embedded validation data \
                     will not chain to a trusted root",
                    metadata.subject
                ),
            });
        }
        if let Some(proxy) = &options.proxy {
            if proxy.base_url.has_trailing_slash() {
                warnings.push(ValidationWarning {
                    code: WarningCode::ProxyTrailingSlash,
                    message: format!(
                        "Proxy base URL '{}' ends in a slash; it will be trimmed \
                         when forwarding requests",
                        proxy.base_url
                    ),
                });
            }
        }

        Ok(ValidationReport { warnings })
    }
}

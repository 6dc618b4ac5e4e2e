//! Abstract signing options model.
//!
//! This is the caller-facing shape; `SigningConfigAdapter` translates it into
//! the engine's native configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::certificate::CertificateProvider;
use crate::domain::types::{ProxyUrl, TsaUrl};

/// Signature conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningLevel {
    /// Basic signature, no timestamp and no revocation evidence.
    Baseline,
    /// Timestamped signature with embedded long-term validation data.
    /// Requires a proxy configuration for the engine's network fetches.
    Advanced,
}

/// Caller-supplied forwarding proxy for the engine's outbound requests.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub base_url: ProxyUrl,
    /// Extra headers attached to every forwarded request. These take
    /// precedence over headers the engine itself sets.
    pub headers: Option<BTreeMap<String, String>>,
}

/// Custom timestamp authority selection for advanced-level signing.
#[derive(Debug, Clone, Default)]
pub struct TimestampAuthorityConfig {
    /// Explicit authority URL; when absent the default preset is used.
    pub url: Option<TsaUrl>,
    /// Headers required by the authority (API keys and the like).
    pub headers: Option<BTreeMap<String, String>>,
}

/// How revocation evidence is gathered for long-term validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LtvMethod {
    /// Try OCSP first, fall back to CRL per certificate.
    OcspThenCrl,
    /// CRL only, for authorities without OCSP responders.
    CrlOnly,
}

/// DocMDP modification tier applied to the signed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocMdpPermission {
    NoChanges,
    FormFilling,
    FormFillingAndAnnotations,
}

impl DocMdpPermission {
    /// DocMDP access-permissions value as defined by the PDF specification.
    #[must_use]
    pub fn native_value(self) -> u8 {
        match self {
            DocMdpPermission::NoChanges => 1,
            DocMdpPermission::FormFilling => 2,
            DocMdpPermission::FormFillingAndAnnotations => 3,
        }
    }
}

/// Horizontal alignment of visible signature text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    Left,
    Center,
    Right,
}

impl TextAlignment {
    /// The engine's three-way alignment enumeration.
    #[must_use]
    pub fn native_value(self) -> u8 {
        match self {
            TextAlignment::Left => 0,
            TextAlignment::Center => 1,
            TextAlignment::Right => 2,
        }
    }
}

/// Placement of the visible signature on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignaturePosition {
    /// Zero-based page index; `None` means the engine's default page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Raster image placed inside the signature rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

/// RGB color for visible signature text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Text rendered inside the signature rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureText {
    pub content: String,
    pub size: f32,
    /// Embedded font program; the engine falls back to a built-in font
    /// when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subset_font: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<RgbColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
}

/// Visible signature appearance. At least one of `image` or `text` must be
/// present; `OptionsValidator` enforces this before signing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleSignature {
    pub position: SignaturePosition,
    pub image: Option<SignatureImage>,
    pub text: Option<SignatureText>,
}

/// Descriptive metadata embedded in the signature dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Everything the caller controls about one signing request.
#[derive(Debug, Clone)]
pub struct SigningRequestOptions {
    pub level: SigningLevel,
    pub certificate: CertificateProvider,
    pub proxy: Option<ProxyConfig>,
    pub timestamp_authority: Option<TimestampAuthorityConfig>,
    pub visible_signature: Option<VisibleSignature>,
    pub metadata: Option<SignatureMetadata>,
    pub permission: Option<DocMdpPermission>,
    pub ltv_method: Option<LtvMethod>,
    pub debug: Option<bool>,
}

impl SigningRequestOptions {
    /// Minimal options for the given level and certificate; everything else
    /// defaults to absent.
    #[must_use]
    pub fn new(level: SigningLevel, certificate: CertificateProvider) -> Self {
        Self {
            level,
            certificate,
            proxy: None,
            timestamp_authority: None,
            visible_signature: None,
            metadata: None,
            permission: None,
            ltv_method: None,
            debug: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_native_values() {
        assert_eq!(TextAlignment::Left.native_value(), 0);
        assert_eq!(TextAlignment::Center.native_value(), 1);
        assert_eq!(TextAlignment::Right.native_value(), 2);
    }

    #[test]
    fn docmdp_native_values() {
        assert_eq!(DocMdpPermission::NoChanges.native_value(), 1);
        assert_eq!(DocMdpPermission::FormFilling.native_value(), 2);
        assert_eq!(DocMdpPermission::FormFillingAndAnnotations.native_value(), 3);
    }

    #[test]
    fn level_serde_round_trip() {
        let json = serde_json::to_string(&SigningLevel::Advanced).unwrap();
        assert_eq!(json, "\"advanced\"");
        let level: SigningLevel = serde_json::from_str("\"baseline\"").unwrap();
        assert_eq!(level, SigningLevel::Baseline);
    }
}

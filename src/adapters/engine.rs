//! Signing engine seam.
//!
//! The engine itself is an external collaborator. This module defines the
//! trait it is invoked through and the native configuration shape it
//! consumes. The handle is constructed explicitly by the caller and passed
//! into the pipeline, so no process-wide engine state exists and test
//! doubles slot in naturally.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::adapters::transport::FetchTransport;

/// Error type produced by engine implementations. Converted into
/// `SignError::SigningFailed` at the pipeline boundary.
pub type EngineError = Box<dyn std::error::Error + Send + Sync>;

/// One PDF signing engine invocation: container-backed configuration in,
/// signed document bytes out.
///
/// Every outbound network request the engine performs (timestamp authority,
/// revocation checks, chain fetches) must go through the supplied transport.
#[async_trait]
pub trait SigningEngine: Send + Sync {
    async fn sign(
        &self,
        document: &[u8],
        config: &NativeSigningConfig,
        transport: Arc<dyn FetchTransport>,
    ) -> Result<Vec<u8>, EngineError>;
}

/// The engine's native configuration object.
///
/// Built exclusively by `SigningConfigAdapter`; absent optional fields are
/// omitted from the serialized form entirely, never defaulted to empty.
/// The engine treats absence itself as a signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeSigningConfig {
    /// PKCS#12 container holding certificate, key and chain.
    pub certificate: Vec<u8>,
    pub password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_mdp_permissions: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    /// Absent for baseline signatures; absence tells the engine not to
    /// timestamp at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NativeTimestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_method: Option<NativeValidationMethod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearance: Option<NativeAppearance>,
}

/// Timestamp authority selection in the engine's shape: a preset identifier,
/// a bare URL, or a URL with custom headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NativeTimestamp {
    Preset(String),
    Url(String),
    WithHeaders {
        url: String,
        headers: BTreeMap<String, String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NativeValidationMethod {
    OcspThenCrl,
    CrlOnly,
}

/// Visible signature appearance in the engine's shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAppearance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    pub rect: NativeRect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<NativeImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<NativeText>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativeRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativeImage {
    pub bytes: Vec<u8>,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeText {
    pub content: String,
    pub size: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subset_font: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
    /// Three-way alignment enumeration: left=0, center=1, right=2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
}

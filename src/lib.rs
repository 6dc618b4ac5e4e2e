//! PDF signing preparation library.
//!
//! Prepares a user-supplied certificate (PKCS#12 container or PEM pair) and
//! a set of signing preferences for an external PDF signing engine, and
//! mediates the engine's outbound network calls through a caller-supplied
//! forwarding proxy.
//!
//! The pipeline: resolve the certificate into one canonical container form,
//! validate the requested options against its metadata, translate the
//! options into the engine's native configuration, then invoke the engine
//! with a per-call fetch transport: proxy-routed for advanced-level
//! signing, plain otherwise.

pub mod adapters;
pub mod domain;
pub mod infra;
pub mod pipelines;
pub mod services;

pub use adapters::engine::{EngineError, NativeSigningConfig, SigningEngine};
pub use adapters::transport::{
    FetchMethod, FetchRequest, FetchResponse, FetchTransport, HttpTransport, ProxyTransport,
    TransportError,
};
pub use domain::certificate::{CertificateInfo, CertificateProvider, ResolvedCertificate};
pub use domain::options::{
    DocMdpPermission, ImageFormat, LtvMethod, ProxyConfig, RgbColor, SignatureImage,
    SignatureMetadata, SignaturePosition, SignatureText, SigningLevel, SigningRequestOptions,
    TextAlignment, TimestampAuthorityConfig, VisibleSignature,
};
pub use domain::types::{ProxyUrl, TsaUrl};
pub use infra::config::{ConfigManager, SignerConfiguration};
pub use infra::error::{SignError, SignResult};
pub use pipelines::sign::{SignWorkflow, SigningOutcome};
pub use services::resolver::{inspect_certificate, CertificateResolver};
pub use services::validator::{OptionsValidator, ValidationReport, ValidationWarning, WarningCode};
pub use services::SigningConfigAdapter;

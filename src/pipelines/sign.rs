//! `SignWorkflow` orchestrates the signing pipeline.
//!
//! Thin sequencer over the service layer: resolve the certificate, validate
//! options against it, translate options into the engine's native
//! configuration, choose the transport, invoke the engine.

use std::sync::Arc;

use crate::adapters::engine::SigningEngine;
use crate::adapters::transport::{FetchTransport, ProxyTransport};
use crate::domain::options::{SigningLevel, SigningRequestOptions};
use crate::infra::error::{SignError, SignResult};
use crate::services::config_adapter::SigningConfigAdapter;
use crate::services::resolver::CertificateResolver;
use crate::services::validator::{OptionsValidator, ValidationWarning};

/// Result of a successful signing call.
#[derive(Debug)]
pub struct SigningOutcome {
    /// The signed document bytes produced by the engine.
    pub document: Vec<u8>,
    /// Non-fatal findings from validation, for optional logging by the
    /// caller.
    pub warnings: Vec<ValidationWarning>,
}

/// Signing pipeline bound to one engine handle and one base transport.
///
/// Both are injected at construction; the workflow holds no other state, so
/// one instance can serve concurrent calls. Proxy routing lives in a
/// per-call transport wrapper and never leaks across calls.
pub struct SignWorkflow {
    engine: Arc<dyn SigningEngine>,
    transport: Arc<dyn FetchTransport>,
}

impl SignWorkflow {
    #[must_use]
    pub fn new(engine: Arc<dyn SigningEngine>, transport: Arc<dyn FetchTransport>) -> Self {
        Self { engine, transport }
    }

    /// Sign a PDF document with the given options.
    pub async fn sign_document(
        &self,
        document: &[u8],
        options: &SigningRequestOptions,
    ) -> SignResult<SigningOutcome> {
        let resolved = CertificateResolver::resolve(&options.certificate)?;
        log::info!(
            "Resolved signing certificate: {} (serial {})",
            resolved.metadata.subject,
            resolved.metadata.serial_number
        );

        let report = OptionsValidator::validate(options, &resolved.metadata)?;
        for warning in &report.warnings {
            log::warn!("{}: {}", warning.code, warning.message);
        }

        let config = SigningConfigAdapter::build(options, &resolved);

        // The proxied transport exists only for this call; other calls on
        // the same workflow keep the unwrapped base transport.
        let transport: Arc<dyn FetchTransport> = match (options.level, &options.proxy) {
            (SigningLevel::Advanced, Some(proxy)) => Arc::new(ProxyTransport::new(
                self.transport.clone(),
                proxy.clone(),
            )),
            _ => self.transport.clone(),
        };

        let signed = self
            .engine
            .sign(document, &config, transport)
            .await
            .map_err(|cause| SignError::SigningFailed { cause })?;
        log::info!("Signing engine produced {} byte document", signed.len());

        Ok(SigningOutcome {
            document: signed,
            warnings: report.warnings,
        })
    }
}

//! Certificate resolution: provider dispatch plus metadata extraction.

use crate::domain::certificate::{CertificateInfo, CertificateProvider, ResolvedCertificate};
use crate::infra::error::SignResult;
use crate::services::cert_info::CertificateInfoExtractor;
use crate::services::container_parser::ContainerParser;
use crate::services::format_converter::FormatConverter;

pub struct CertificateResolver;

impl CertificateResolver {
    /// Normalize any provider variant into one canonical container/password
    /// pair plus extracted metadata.
    ///
    /// Errors from the underlying parser or converter propagate unchanged;
    /// metadata is always complete on success, never partial.
    pub fn resolve(provider: &CertificateProvider) -> SignResult<ResolvedCertificate> {
        let parsed = match provider {
            CertificateProvider::Container { bytes, password } => {
                ContainerParser::parse(bytes, password)?
            }
            CertificateProvider::PemPair {
                certificate_pem,
                private_key_pem,
                passphrase,
            } => FormatConverter::convert(
                certificate_pem,
                private_key_pem,
                passphrase.as_deref(),
            )?,
        };

        let metadata = CertificateInfoExtractor::extract(&parsed.leaf_certificate)?;
        log::debug!(
            "Resolved certificate: subject={}, serial={}",
            metadata.subject,
            metadata.serial_number
        );

        Ok(ResolvedCertificate {
            container_bytes: parsed.container_bytes,
            container_password: parsed.container_password,
            metadata,
        })
    }
}

/// Inspect a certificate without signing anything.
///
/// Runs the same resolution path and returns only the metadata.
pub fn inspect_certificate(provider: &CertificateProvider) -> SignResult<CertificateInfo> {
    CertificateResolver::resolve(provider).map(|resolved| resolved.metadata)
}

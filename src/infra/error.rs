//! Error types and result definitions for the signing pipeline.
//!
//! Collaborator failures (OpenSSL decode/decrypt errors) are normalized into
//! this taxonomy at the boundary and never leak as foreign types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for signing operations.
pub type SignResult<T> = Result<T, SignError>;

/// Error taxonomy for certificate resolution, validation and signing.
#[derive(Error, Debug, miette::Diagnostic)]
pub enum SignError {
    #[error("Advanced signing level requires a proxy configuration")]
    ProxyRequired,

    #[error("Certificate expired on {valid_to}")]
    CertificateExpired { valid_to: DateTime<Utc> },

    #[error("Certificate is not valid until {valid_from}")]
    CertificateNotYetValid { valid_from: DateTime<Utc> },

    #[error("Private key is encrypted and requires a passphrase")]
    PassphraseRequired,

    #[error("{message}")]
    CertificateParse { message: String },

    #[error("Invalid signing options: {message}")]
    InvalidOptions { message: String },

    #[error("Signing engine failed: {cause}")]
    SigningFailed {
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<openssl::error::ErrorStack> for SignError {
    fn from(error: openssl::error::ErrorStack) -> Self {
        SignError::CertificateParse {
            message: error.to_string(),
        }
    }
}

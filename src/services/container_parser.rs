//! PKCS#12 container parsing service.

use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::x509::X509;

use crate::infra::error::{SignError, SignResult};

/// Decoded contents of a PKCS#12 container.
///
/// The original container bytes and password are carried through unchanged:
/// the signing engine consumes the container itself, the decoded members are
/// only used for metadata extraction and validation.
#[derive(Debug)]
pub struct ParsedContainer {
    pub container_bytes: Vec<u8>,
    pub container_password: String,
    pub leaf_certificate: X509,
    pub private_key: PKey<Private>,
    pub ca_chain: Vec<X509>,
}

pub struct ContainerParser;

impl ContainerParser {
    /// Decode a PKCS#12 container with the given password.
    ///
    /// The first certificate entry is the signing certificate; remaining
    /// entries form the CA chain. Shrouded key entries are preferred, with a
    /// fallback to unshrouded entries for legacy containers; both are handled
    /// by the OpenSSL decoder.
    pub fn parse(bytes: &[u8], password: &str) -> SignResult<ParsedContainer> {
        let pkcs12 = Pkcs12::from_der(bytes).map_err(|e| SignError::CertificateParse {
            message: format!("Failed to decode PKCS#12 container: {e}"),
        })?;

        // A MAC/decryption failure here almost always means a wrong password;
        // normalize to one stable message rather than surfacing OpenSSL's.
        let parsed = pkcs12
            .parse2(password)
            .map_err(|_| SignError::CertificateParse {
                message: "Invalid certificate password".to_string(),
            })?;

        let leaf_certificate = parsed.cert.ok_or_else(|| SignError::CertificateParse {
            message: "PKCS#12 container holds no certificate entry".to_string(),
        })?;
        let private_key = parsed.pkey.ok_or_else(|| SignError::CertificateParse {
            message: "PKCS#12 container holds no private key entry".to_string(),
        })?;
        let ca_chain: Vec<X509> = parsed
            .ca
            .map(|stack| stack.into_iter().collect())
            .unwrap_or_default();

        log::debug!(
            "Decoded PKCS#12 container: {} CA certificate(s) in chain",
            ca_chain.len()
        );

        Ok(ParsedContainer {
            container_bytes: bytes.to_vec(),
            container_password: password.to_string(),
            leaf_certificate,
            private_key,
            ca_chain,
        })
    }
}

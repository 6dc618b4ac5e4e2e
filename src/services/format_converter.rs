//! PEM-to-container conversion service.
//!
//! The signing engine only accepts PKCS#12 containers, so PEM-supplied
//! material is re-packed into an in-memory container before signing.

use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::x509::X509;

use crate::domain::constants;
use crate::infra::error::{SignError, SignResult};
use crate::services::container_parser::ParsedContainer;

pub struct FormatConverter;

impl FormatConverter {
    /// Parse a PEM certificate and private key and synthesize an equivalent
    /// in-memory PKCS#12 container.
    ///
    /// The container is encrypted under a fixed internal password; the PEM
    /// path carries no CA chain.
    pub fn convert(
        certificate_pem: &str,
        private_key_pem: &str,
        passphrase: Option<&str>,
    ) -> SignResult<ParsedContainer> {
        let certificate =
            X509::from_pem(certificate_pem.as_bytes()).map_err(|e| SignError::CertificateParse {
                message: format!("Failed to parse certificate PEM: {e}"),
            })?;

        let private_key = Self::parse_private_key(private_key_pem, passphrase)?;

        let mut builder = Pkcs12::builder();
        builder.name("signing certificate");
        builder.pkey(&private_key);
        builder.cert(&certificate);
        let container = builder
            .build2(constants::CONVERTED_CONTAINER_PASSWORD)
            .map_err(|e| SignError::CertificateParse {
                message: format!("Failed to build container from PEM material: {e}"),
            })?;
        let container_bytes = container.to_der().map_err(|e| SignError::CertificateParse {
            message: format!("Failed to encode container: {e}"),
        })?;

        log::debug!("Converted PEM pair into in-memory PKCS#12 container");

        Ok(ParsedContainer {
            container_bytes,
            container_password: constants::CONVERTED_CONTAINER_PASSWORD.to_string(),
            leaf_certificate: certificate,
            private_key,
            ca_chain: Vec::new(),
        })
    }

    fn parse_private_key(pem: &str, passphrase: Option<&str>) -> SignResult<PKey<Private>> {
        match passphrase {
            None if Self::is_encrypted_pem(pem) => Err(SignError::PassphraseRequired),
            None => PKey::private_key_from_pem(pem.as_bytes()).map_err(|e| {
                SignError::CertificateParse {
                    message: format!("Failed to parse private key PEM: {e}"),
                }
            }),
            Some(passphrase) => {
                PKey::private_key_from_pem_passphrase(pem.as_bytes(), passphrase.as_bytes())
                    .map_err(|_| SignError::CertificateParse {
                        message: "Wrong private key passphrase".to_string(),
                    })
            }
        }
    }

    /// Whether the PEM text declares an encrypted key, either as a PKCS#8
    /// `ENCRYPTED PRIVATE KEY` block or a legacy `Proc-Type` header.
    fn is_encrypted_pem(pem: &str) -> bool {
        pem.contains("ENCRYPTED PRIVATE KEY") || pem.contains("Proc-Type: 4,ENCRYPTED")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openssl::asn1::Asn1Time;
    use openssl::bn::BigNum;
    use openssl::hash::MessageDigest;
    use openssl::rsa::Rsa;
    use openssl::symm::Cipher;
    use openssl::x509::{X509Builder, X509NameBuilder};

    fn pem_identity() -> (String, PKey<Private>) {
        let rsa = Rsa::generate(2048).unwrap();
        let key = PKey::from_rsa(rsa).unwrap();

        let mut name = X509NameBuilder::new().unwrap();
        name.append_entry_by_text("CN", "Pem Test").unwrap();
        let name = name.build();

        let mut builder = X509Builder::new().unwrap();
        builder.set_version(2).unwrap();
        builder.set_subject_name(&name).unwrap();
        builder.set_issuer_name(&name).unwrap();
        let serial = BigNum::from_u32(7).unwrap().to_asn1_integer().unwrap();
        builder.set_serial_number(&serial).unwrap();
        builder
            .set_not_before(&Asn1Time::days_from_now(0).unwrap())
            .unwrap();
        builder
            .set_not_after(&Asn1Time::days_from_now(30).unwrap())
            .unwrap();
        builder.set_pubkey(&key).unwrap();
        builder.sign(&key, MessageDigest::sha256()).unwrap();
        let cert_pem = String::from_utf8(builder.build().to_pem().unwrap()).unwrap();
        (cert_pem, key)
    }

    #[test]
    fn converts_plain_pem_pair() {
        let (cert_pem, key) = pem_identity();
        let key_pem = String::from_utf8(key.private_key_to_pem_pkcs8().unwrap()).unwrap();

        let converted = FormatConverter::convert(&cert_pem, &key_pem, None).unwrap();
        assert_eq!(
            converted.container_password,
            constants::CONVERTED_CONTAINER_PASSWORD
        );
        assert!(converted.ca_chain.is_empty());
        assert!(!converted.container_bytes.is_empty());
    }

    #[test]
    fn encrypted_key_without_passphrase_is_rejected() {
        let (cert_pem, key) = pem_identity();
        let key_pem = String::from_utf8(
            key.private_key_to_pem_pkcs8_passphrase(Cipher::aes_256_cbc(), b"topsecret")
                .unwrap(),
        )
        .unwrap();

        let err = FormatConverter::convert(&cert_pem, &key_pem, None).unwrap_err();
        assert!(matches!(err, SignError::PassphraseRequired));
    }

    #[test]
    fn encrypted_key_with_wrong_passphrase() {
        let (cert_pem, key) = pem_identity();
        let key_pem = String::from_utf8(
            key.private_key_to_pem_pkcs8_passphrase(Cipher::aes_256_cbc(), b"topsecret")
                .unwrap(),
        )
        .unwrap();

        let err = FormatConverter::convert(&cert_pem, &key_pem, Some("nope")).unwrap_err();
        match err {
            SignError::CertificateParse { message } => {
                assert_eq!(message, "Wrong private key passphrase");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn encrypted_key_with_correct_passphrase() {
        let (cert_pem, key) = pem_identity();
        let key_pem = String::from_utf8(
            key.private_key_to_pem_pkcs8_passphrase(Cipher::aes_256_cbc(), b"topsecret")
                .unwrap(),
        )
        .unwrap();

        let converted = FormatConverter::convert(&cert_pem, &key_pem, Some("topsecret")).unwrap();
        assert!(!converted.container_bytes.is_empty());
    }

    #[test]
    fn malformed_certificate_pem() {
        let err = FormatConverter::convert("not a pem", "also not a pem", None).unwrap_err();
        match err {
            SignError::CertificateParse { message } => {
                assert!(message.contains("Failed to parse certificate PEM"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

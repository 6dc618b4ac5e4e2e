//! Certificate metadata extraction service.

use chrono::{DateTime, Utc};
use openssl::asn1::{Asn1Time, Asn1TimeRef};
use openssl::nid::Nid;
use openssl::x509::{X509NameRef, X509Ref};
use sha2::{Digest, Sha256};

use crate::domain::certificate::CertificateInfo;
use crate::infra::error::{SignError, SignResult};

pub struct CertificateInfoExtractor;

impl CertificateInfoExtractor {
    /// Map a decoded certificate to its display metadata.
    ///
    /// `is_expired` is evaluated against the current clock on every call.
    pub fn extract(certificate: &X509Ref) -> SignResult<CertificateInfo> {
        let subject = Self::display_name(certificate.subject_name());
        let issuer = Self::display_name(certificate.issuer_name());

        let valid_from = Self::asn1_time_to_datetime(certificate.not_before())?;
        let valid_to = Self::asn1_time_to_datetime(certificate.not_after())?;

        let serial_number = certificate
            .serial_number()
            .to_bn()
            .map(|bn| hex::encode(bn.to_vec()))
            .map_err(|e| SignError::CertificateParse {
                message: format!("Failed to read certificate serial number: {e}"),
            })?;

        let is_self_signed = match (
            Self::name_digest(certificate.subject_name()),
            Self::name_digest(certificate.issuer_name()),
        ) {
            (Some(subject_digest), Some(issuer_digest)) => subject_digest == issuer_digest,
            _ => false,
        };

        Ok(CertificateInfo {
            subject,
            issuer,
            valid_from,
            valid_to,
            serial_number,
            is_expired: Utc::now() > valid_to,
            is_self_signed,
        })
    }

    /// Display string for an X.509 name: the Common Name when present,
    /// otherwise every attribute joined as `shortName=value` in stored order.
    fn display_name(name: &X509NameRef) -> String {
        if let Some(entry) = name.entries_by_nid(Nid::COMMONNAME).next() {
            if let Ok(cn) = entry.data().as_utf8() {
                return cn.to_string();
            }
        }

        let mut parts = Vec::new();
        for entry in name.entries() {
            let short_name = entry.object().nid().short_name();
            let value = entry.data().as_utf8();
            if let (Ok(short_name), Ok(value)) = (short_name, value) {
                parts.push(format!("{short_name}={value}"));
            }
        }
        parts.join(", ")
    }

    /// Structural identity digest of a name, for self-signed detection.
    /// Not a cryptographic verification of the certificate signature.
    fn name_digest(name: &X509NameRef) -> Option<[u8; 32]> {
        let der = name.to_der().ok()?;
        Some(Sha256::digest(&der).into())
    }

    fn asn1_time_to_datetime(time: &Asn1TimeRef) -> SignResult<DateTime<Utc>> {
        let epoch = Asn1Time::from_unix(0).map_err(|e| SignError::CertificateParse {
            message: format!("Failed to construct epoch reference: {e}"),
        })?;
        let diff = epoch.diff(time).map_err(|e| SignError::CertificateParse {
            message: format!("Failed to read certificate validity: {e}"),
        })?;
        let seconds = i64::from(diff.days) * 86_400 + i64::from(diff.secs);
        DateTime::from_timestamp(seconds, 0).ok_or_else(|| SignError::CertificateParse {
            message: "Certificate validity timestamp out of range".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openssl::bn::BigNum;
    use openssl::hash::MessageDigest;
    use openssl::pkey::{PKey, Private};
    use openssl::rsa::Rsa;
    use openssl::x509::{X509, X509Builder, X509Name, X509NameBuilder};

    fn rsa_key() -> PKey<Private> {
        PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap()
    }

    fn name_with_cn(cn: &str) -> X509Name {
        let mut builder = X509NameBuilder::new().unwrap();
        builder.append_entry_by_text("CN", cn).unwrap();
        builder.build()
    }

    fn build_cert(
        subject: &X509Name,
        issuer: &X509Name,
        key: &PKey<Private>,
        signer: &PKey<Private>,
        serial: u32,
    ) -> X509 {
        let mut builder = X509Builder::new().unwrap();
        builder.set_version(2).unwrap();
        builder.set_subject_name(subject).unwrap();
        builder.set_issuer_name(issuer).unwrap();
        let serial = BigNum::from_u32(serial).unwrap().to_asn1_integer().unwrap();
        builder.set_serial_number(&serial).unwrap();
        builder
            .set_not_before(&Asn1Time::days_from_now(0).unwrap())
            .unwrap();
        builder
            .set_not_after(&Asn1Time::days_from_now(90).unwrap())
            .unwrap();
        builder.set_pubkey(key).unwrap();
        builder.sign(signer, MessageDigest::sha256()).unwrap();
        builder.build()
    }

    #[test]
    fn extracts_common_name_and_serial() {
        let key = rsa_key();
        let name = name_with_cn("Example Signer");
        let cert = build_cert(&name, &name, &key, &key, 0xABCD);

        let info = CertificateInfoExtractor::extract(&cert).unwrap();
        assert_eq!(info.subject, "Example Signer");
        assert_eq!(info.issuer, "Example Signer");
        assert_eq!(info.serial_number, "abcd");
        assert!(info.is_self_signed);
        assert!(!info.is_expired);
        assert!(info.valid_from < info.valid_to);
    }

    #[test]
    fn falls_back_to_joined_distinguished_name() {
        let key = rsa_key();
        let mut builder = X509NameBuilder::new().unwrap();
        builder.append_entry_by_text("O", "Acme Corp").unwrap();
        builder.append_entry_by_text("C", "DE").unwrap();
        let name = builder.build();
        let cert = build_cert(&name, &name, &key, &key, 1);

        let info = CertificateInfoExtractor::extract(&cert).unwrap();
        assert_eq!(info.subject, "O=Acme Corp, C=DE");
    }

    #[test]
    fn ca_issued_certificate_is_not_self_signed() {
        let ca_key = rsa_key();
        let ca_name = name_with_cn("Test CA");
        let leaf_key = rsa_key();
        let leaf_name = name_with_cn("Leaf");
        let cert = build_cert(&leaf_name, &ca_name, &leaf_key, &ca_key, 2);

        let info = CertificateInfoExtractor::extract(&cert).unwrap();
        assert!(!info.is_self_signed);
        assert_eq!(info.subject, "Leaf");
        assert_eq!(info.issuer, "Test CA");
    }
}

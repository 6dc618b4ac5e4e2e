//! Shared helpers for integration tests: runtime-generated certificate
//! material, so no fixture files are needed.

#![allow(dead_code)]

use chrono::Utc;
use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::stack::Stack;
use openssl::symm::Cipher;
use openssl::x509::{X509, X509Builder, X509Name, X509NameBuilder};

pub fn rsa_key() -> PKey<Private> {
    PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap()
}

pub fn name_with_cn(cn: &str) -> X509Name {
    let mut builder = X509NameBuilder::new().unwrap();
    builder.append_entry_by_text("CN", cn).unwrap();
    builder.build()
}

pub struct CertParams<'a> {
    pub subject: &'a X509Name,
    pub issuer: &'a X509Name,
    pub public_key: &'a PKey<Private>,
    pub signer_key: &'a PKey<Private>,
    pub serial: u32,
    /// Validity bounds as offsets in days relative to now; negative values
    /// produce certificates that are already expired or not yet valid.
    pub valid_from_days: i64,
    pub valid_to_days: i64,
}

pub fn build_cert(params: &CertParams<'_>) -> X509 {
    let now = Utc::now().timestamp();
    let not_before = Asn1Time::from_unix(now + params.valid_from_days * 86_400).unwrap();
    let not_after = Asn1Time::from_unix(now + params.valid_to_days * 86_400).unwrap();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    builder.set_subject_name(params.subject).unwrap();
    builder.set_issuer_name(params.issuer).unwrap();
    let serial = BigNum::from_u32(params.serial)
        .unwrap()
        .to_asn1_integer()
        .unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_not_before(&not_before).unwrap();
    builder.set_not_after(&not_after).unwrap();
    builder.set_pubkey(params.public_key).unwrap();
    builder
        .sign(params.signer_key, MessageDigest::sha256())
        .unwrap();
    builder.build()
}

pub fn self_signed(cn: &str) -> (X509, PKey<Private>) {
    let key = rsa_key();
    let name = name_with_cn(cn);
    let cert = build_cert(&CertParams {
        subject: &name,
        issuer: &name,
        public_key: &key,
        signer_key: &key,
        serial: 0x1001,
        valid_from_days: -1,
        valid_to_days: 90,
    });
    (cert, key)
}

pub fn expired_self_signed(cn: &str) -> (X509, PKey<Private>) {
    let key = rsa_key();
    let name = name_with_cn(cn);
    let cert = build_cert(&CertParams {
        subject: &name,
        issuer: &name,
        public_key: &key,
        signer_key: &key,
        serial: 0x1002,
        valid_from_days: -100,
        valid_to_days: -1,
    });
    (cert, key)
}

/// A leaf certificate issued by a separate CA, plus the CA certificate.
pub fn ca_signed_leaf(cn: &str) -> (X509, PKey<Private>, X509) {
    let ca_key = rsa_key();
    let ca_name = name_with_cn("Integration Test CA");
    let ca_cert = build_cert(&CertParams {
        subject: &ca_name,
        issuer: &ca_name,
        public_key: &ca_key,
        signer_key: &ca_key,
        serial: 0x2001,
        valid_from_days: -1,
        valid_to_days: 365,
    });

    let leaf_key = rsa_key();
    let leaf_name = name_with_cn(cn);
    let leaf_cert = build_cert(&CertParams {
        subject: &leaf_name,
        issuer: &ca_name,
        public_key: &leaf_key,
        signer_key: &ca_key,
        serial: 0x2002,
        valid_from_days: -1,
        valid_to_days: 90,
    });
    (leaf_cert, leaf_key, ca_cert)
}

pub fn pkcs12_der(cert: &X509, key: &PKey<Private>, chain: &[X509], password: &str) -> Vec<u8> {
    let mut builder = Pkcs12::builder();
    builder.name("integration test");
    builder.pkey(key);
    builder.cert(cert);
    if !chain.is_empty() {
        let mut stack = Stack::new().unwrap();
        for ca in chain {
            stack.push(ca.clone()).unwrap();
        }
        builder.ca(stack);
    }
    builder.build2(password).unwrap().to_der().unwrap()
}

pub fn cert_pem(cert: &X509) -> String {
    String::from_utf8(cert.to_pem().unwrap()).unwrap()
}

pub fn key_pem(key: &PKey<Private>) -> String {
    String::from_utf8(key.private_key_to_pem_pkcs8().unwrap()).unwrap()
}

pub fn encrypted_key_pem(key: &PKey<Private>, passphrase: &str) -> String {
    String::from_utf8(
        key.private_key_to_pem_pkcs8_passphrase(Cipher::aes_256_cbc(), passphrase.as_bytes())
            .unwrap(),
    )
    .unwrap()
}

//! Fixed tables and internal constants shared across the signing pipeline.
//! Keep this intentionally small; only broadly reused values should live here.

/// Timestamp authority presets understood by the signing engine.
///
/// The engine accepts a single-character preset identifier in place of a full
/// timestamp authority URL; this table maps each identifier to the well-known
/// authority it stands for.
pub const TSA_PRESETS: &[(&str, &str)] = &[
    ("1", "http://timestamp.digicert.com"),
    ("2", "http://timestamp.globalsign.com/tsa/r6advanced1"),
    ("3", "http://timestamp.sectigo.com"),
    ("4", "http://timestamp.entrust.net/TSS/RFC3161sha2TS"),
    ("5", "http://tsa.swisssign.net"),
    ("6", "http://timestamp.apple.com/ts01"),
    ("7", "http://ts.ssl.com"),
];

/// Preset used when advanced signing is requested without an explicit
/// timestamp authority URL.
pub const DEFAULT_TSA_PRESET: &str = "1";

/// Resolve a preset identifier to its timestamp authority URL.
#[must_use]
pub fn tsa_preset_url(id: &str) -> Option<&'static str> {
    TSA_PRESETS
        .iter()
        .find(|(preset, _)| *preset == id)
        .map(|(_, url)| *url)
}

/// Password under which PEM-origin material is re-encrypted into container
/// form for the signing engine.
///
/// The container exists only in memory for the duration of one signing call;
/// the private key it holds was already protected by its own passphrase
/// upstream, so this constant is not a security boundary.
pub const CONVERTED_CONTAINER_PASSWORD: &str = "pdf-signer-internal";

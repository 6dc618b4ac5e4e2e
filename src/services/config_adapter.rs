//! Translation of the abstract options model into the engine's native
//! configuration shape.
//!
//! Pure mapping: no I/O and no failure path, input is assumed validated.

use crate::adapters::engine::{
    NativeAppearance, NativeImage, NativeRect, NativeSigningConfig, NativeText, NativeTimestamp,
    NativeValidationMethod,
};
use crate::domain::certificate::ResolvedCertificate;
use crate::domain::constants;
use crate::domain::options::{
    DocMdpPermission, LtvMethod, SigningLevel, SigningRequestOptions, TextAlignment,
    TimestampAuthorityConfig, VisibleSignature,
};

pub struct SigningConfigAdapter;

impl SigningConfigAdapter {
    /// Build the engine's native configuration from validated options and a
    /// resolved certificate. Deterministic and lossless; absent optional
    /// fields stay absent.
    #[must_use]
    pub fn build(
        options: &SigningRequestOptions,
        resolved: &ResolvedCertificate,
    ) -> NativeSigningConfig {
        let mut config = NativeSigningConfig {
            certificate: resolved.container_bytes.clone(),
            password: resolved.container_password.clone(),
            doc_mdp_permissions: options.permission.map(DocMdpPermission::native_value),
            reason: None,
            location: None,
            contact_info: None,
            signer_name: None,
            debug: options.debug,
            timestamp: None,
            validation_method: None,
            appearance: None,
        };

        if let Some(metadata) = &options.metadata {
            config.reason = metadata.reason.clone();
            config.location = metadata.location.clone();
            config.contact_info = metadata.contact_info.clone();
            config.signer_name = metadata.name.clone();
        }

        // Baseline signatures carry no timestamp or validation fields at
        // all; their absence is what tells the engine to skip both.
        if options.level == SigningLevel::Advanced {
            config.timestamp = Some(Self::select_timestamp_authority(
                options.timestamp_authority.as_ref(),
            ));
            config.validation_method = Some(match options.ltv_method {
                Some(LtvMethod::CrlOnly) => NativeValidationMethod::CrlOnly,
                Some(LtvMethod::OcspThenCrl) | None => NativeValidationMethod::OcspThenCrl,
            });
        }

        if let Some(visible) = &options.visible_signature {
            config.appearance = Some(Self::map_appearance(visible));
        }

        config
    }

    fn select_timestamp_authority(
        tsa: Option<&TimestampAuthorityConfig>,
    ) -> NativeTimestamp {
        match tsa {
            Some(config) => match (&config.url, &config.headers) {
                (Some(url), Some(headers)) if !headers.is_empty() => {
                    NativeTimestamp::WithHeaders {
                        url: url.as_str().to_owned(),
                        headers: headers.clone(),
                    }
                }
                (Some(url), _) => NativeTimestamp::Url(url.as_str().to_owned()),
                (None, _) => NativeTimestamp::Preset(constants::DEFAULT_TSA_PRESET.to_string()),
            },
            None => NativeTimestamp::Preset(constants::DEFAULT_TSA_PRESET.to_string()),
        }
    }

    fn map_appearance(visible: &VisibleSignature) -> NativeAppearance {
        NativeAppearance {
            page: visible.position.page,
            rect: NativeRect {
                x: visible.position.x,
                y: visible.position.y,
                width: visible.position.width,
                height: visible.position.height,
            },
            image: visible.image.as_ref().map(|image| NativeImage {
                bytes: image.bytes.clone(),
                format: image.format.as_str().to_owned(),
            }),
            text: visible.text.as_ref().map(|text| NativeText {
                content: text.content.clone(),
                size: text.size,
                font: text.font.clone(),
                subset_font: text.subset_font,
                color: text.color.map(|color| [color.r, color.g, color.b]),
                alignment: text.alignment.map(TextAlignment::native_value),
                line_height: text.line_height,
            }),
        }
    }
}

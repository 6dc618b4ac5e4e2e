//! Configuration file support.
//!
//! Lets users persist default signing preferences (level, proxy, timestamp
//! authority) so the CLI and embedding applications do not have to repeat
//! them per call.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::constants;
use crate::domain::options::SigningLevel;
use crate::domain::types::{ProxyUrl, TsaUrl};
use crate::infra::error::{SignError, SignResult};

/// Persisted signing preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerConfiguration {
    /// Signing level applied when the caller does not specify one.
    pub default_level: SigningLevel,

    /// Base URL of the forwarding proxy for advanced-level signing.
    pub proxy_base_url: Option<String>,

    /// Extra headers attached to proxied requests.
    #[serde(default)]
    pub proxy_headers: BTreeMap<String, String>,

    /// Explicit timestamp authority URL.
    pub timestamp_url: Option<String>,

    /// Timestamp authority preset identifier, used when no explicit URL is
    /// configured.
    pub timestamp_preset: Option<String>,

    /// Whether to ask the engine for verbose diagnostics.
    pub debug: bool,
}

impl Default for SignerConfiguration {
    fn default() -> Self {
        Self {
            default_level: SigningLevel::Baseline,
            proxy_base_url: None,
            proxy_headers: BTreeMap::new(),
            timestamp_url: None,
            timestamp_preset: Some(constants::DEFAULT_TSA_PRESET.to_string()),
            debug: false,
        }
    }
}

/// Configuration manager for handling config files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new configuration manager with the default path.
    pub fn new() -> SignResult<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Create a configuration manager with a custom path.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> SignResult<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("pdf-signer").join("config.toml"))
        } else {
            Ok(PathBuf::from("pdf-signer-config.toml"))
        }
    }

    /// Load configuration from file, creating the default if it doesn't
    /// exist yet.
    pub fn load_or_create_default(&self) -> SignResult<SignerConfiguration> {
        if self.config_path.exists() {
            self.load()
        } else {
            log::info!(
                "Configuration file not found, creating default: {}",
                self.config_path.display()
            );
            let default_config = SignerConfiguration::default();
            self.save(&default_config)?;
            Ok(default_config)
        }
    }

    /// Load configuration from file.
    pub fn load(&self) -> SignResult<SignerConfiguration> {
        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            SignError::Configuration(format!(
                "Failed to read config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let config: SignerConfiguration = toml::from_str(&content)
            .map_err(|e| SignError::Configuration(format!("Failed to parse config file: {e}")))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, config: &SignerConfiguration) -> SignResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SignError::Configuration(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(config)
            .map_err(|e| SignError::Configuration(format!("Failed to serialize config: {e}")))?;

        fs::write(&self.config_path, content).map_err(|e| {
            SignError::Configuration(format!(
                "Failed to write config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        log::info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Get the configuration file path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn validate(config: &SignerConfiguration) -> SignResult<()> {
        if let Some(url) = &config.proxy_base_url {
            ProxyUrl::new(url)
                .map_err(|e| SignError::Configuration(format!("Invalid proxy base URL: {e}")))?;
        }
        if let Some(url) = &config.timestamp_url {
            TsaUrl::new(url).map_err(|e| {
                SignError::Configuration(format!("Invalid timestamp authority URL: {e}"))
            })?;
        }
        if let Some(preset) = &config.timestamp_preset {
            if constants::tsa_preset_url(preset).is_none() {
                return Err(SignError::Configuration(format!(
                    "Unknown timestamp authority preset: {preset}"
                )));
            }
        }
        Ok(())
    }
}

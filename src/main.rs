//! `pdf-signer` command line interface.
//!
//! Inspects certificate material and manages the configuration file. The
//! signing pipeline itself is library-only; it needs an engine handle that
//! the embedding application provides.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use pdf_signer::{inspect_certificate, CertificateProvider, ConfigManager, SignResult};

#[derive(Parser)]
#[command(name = "pdf-signer")]
#[command(about = "Inspect signing certificates and manage pdf-signer configuration")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a certificate and print its metadata as JSON
    Inspect {
        /// Path to a PKCS#12 container (.p12/.pfx)
        #[arg(long, conflicts_with_all = ["cert", "key"])]
        container: Option<PathBuf>,

        /// Container password (or set `PDF_SIGNER_PASSWORD`)
        #[arg(long, env = "PDF_SIGNER_PASSWORD")]
        password: Option<String>,

        /// Path to a PEM certificate
        #[arg(long, requires = "key")]
        cert: Option<PathBuf>,

        /// Path to a PEM private key
        #[arg(long, requires = "cert")]
        key: Option<PathBuf>,

        /// Passphrase for an encrypted PEM private key
        #[arg(long)]
        passphrase: Option<String>,
    },

    /// Show the effective configuration, creating the default file if needed
    Config {
        /// Use a custom configuration file path
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Inspect {
            container,
            password,
            cert,
            key,
            passphrase,
        } => run_inspect(container, password, cert, key, passphrase),
        Commands::Config { path } => run_config(path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_inspect(
    container: Option<PathBuf>,
    password: Option<String>,
    cert: Option<PathBuf>,
    key: Option<PathBuf>,
    passphrase: Option<String>,
) -> SignResult<()> {
    let provider = build_provider(container, password, cert, key, passphrase)?;
    let info = inspect_certificate(&provider)?;

    let json = serde_json::to_string_pretty(&info)
        .map_err(|e| pdf_signer::SignError::Configuration(format!("JSON encoding failed: {e}")))?;
    println!("{json}");

    if info.is_expired {
        log::warn!("Certificate is expired");
    }
    if info.is_self_signed {
        log::warn!("Certificate is self-signed");
    }
    Ok(())
}

fn build_provider(
    container: Option<PathBuf>,
    password: Option<String>,
    cert: Option<PathBuf>,
    key: Option<PathBuf>,
    passphrase: Option<String>,
) -> SignResult<CertificateProvider> {
    use pdf_signer::SignError;

    if let Some(container_path) = container {
        let bytes = std::fs::read(&container_path).map_err(|e| {
            SignError::Configuration(format!(
                "Failed to read container {}: {}",
                container_path.display(),
                e
            ))
        })?;
        let password = password.ok_or_else(|| {
            SignError::Configuration("A container requires --password".to_string())
        })?;
        return Ok(CertificateProvider::Container { bytes, password });
    }

    match (cert, key) {
        (Some(cert_path), Some(key_path)) => {
            let certificate_pem = std::fs::read_to_string(&cert_path).map_err(|e| {
                SignError::Configuration(format!(
                    "Failed to read certificate {}: {}",
                    cert_path.display(),
                    e
                ))
            })?;
            let private_key_pem = std::fs::read_to_string(&key_path).map_err(|e| {
                SignError::Configuration(format!(
                    "Failed to read private key {}: {}",
                    key_path.display(),
                    e
                ))
            })?;
            Ok(CertificateProvider::PemPair {
                certificate_pem,
                private_key_pem,
                passphrase,
            })
        }
        _ => Err(SignError::Configuration(
            "Provide either --container or --cert and --key".to_string(),
        )),
    }
}

fn run_config(path: Option<PathBuf>) -> SignResult<()> {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };

    let config = manager.load_or_create_default()?;
    let toml_str = toml::to_string_pretty(&config)
        .map_err(|e| pdf_signer::SignError::Configuration(format!("TOML encoding failed: {e}")))?;
    println!("# {}", manager.config_path().display());
    print!("{toml_str}");
    Ok(())
}

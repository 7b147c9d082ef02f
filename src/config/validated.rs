//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::pipeline::LogLevel;
use crate::providers::ClientConfig;
use crate::providers::quikk::WebhookKind;

use super::cli::{AuthenticateArgs, Cli, Command, ProviderArg};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::{ProviderSection, TomlConfig};

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// What to do
    pub action: Action,

    /// Verbose logging enabled
    pub verbose: bool,
}

/// A validated subcommand.
#[derive(Debug)]
pub enum Action {
    /// Write the configuration template to `output`
    Init {
        /// Where to write it
        output: PathBuf,
    },
    /// Authenticate against a provider
    Authenticate(ProviderSettings),
    /// Dispatch a webhook read from a file
    Webhook(WebhookSettings),
}

/// Everything needed to talk to one provider.
#[derive(Clone)]
pub struct ProviderSettings {
    /// Which provider
    pub provider: ProviderArg,
    /// Base URL
    pub endpoint: Url,
    /// Consumer key, client id or API key
    pub key: String,
    /// Consumer secret, client secret or API secret
    pub secret: String,
    /// Business-operation timeout
    pub timeout: Duration,
    /// Request logging verbosity
    pub log_level: LogLevel,
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint.as_str())
            .field("key", &self.key)
            .field("timeout", &self.timeout)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

impl ProviderSettings {
    /// Returns the client configuration these settings describe.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.endpoint.as_str().trim_end_matches('/'))
            .with_timeout(self.timeout)
            .with_log_level(self.log_level)
    }
}

/// Everything needed to dispatch one webhook.
#[derive(Debug, Clone)]
pub struct WebhookSettings {
    /// Operation the webhook reports on
    pub kind: WebhookKind,
    /// File holding the raw body
    pub file: PathBuf,
    /// `meta.code` value that means success
    pub success_code: String,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            Action::Init { output } => write!(f, "Config {{ init: {} }}", output.display()),
            Action::Authenticate(settings) => write!(
                f,
                "Config {{ authenticate: {}, endpoint: {}, timeout: {}s, log_level: {} }}",
                settings.provider,
                settings.endpoint,
                settings.timeout.as_secs(),
                settings.log_level,
            ),
            Action::Webhook(settings) => write!(
                f,
                "Config {{ webhook: {}, file: {}, success_code: {} }}",
                settings.kind,
                settings.file.display(),
                settings.success_code,
            ),
        }
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Credentials are missing (`key`, `secret`)
    /// - The endpoint is not a URL
    /// - The timeout is zero
    /// - The log level is unknown
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let action = match &cli.command {
            Command::Init { output } => Action::Init {
                output: output.clone(),
            },
            Command::Authenticate(args) => {
                let section = toml.map(|t| t.provider(args.provider));
                Action::Authenticate(Self::resolve_provider(args, section)?)
            }
            Command::Webhook {
                kind,
                success_code,
                file,
            } => {
                let success_code = success_code
                    .clone()
                    .or_else(|| toml.and_then(|t| t.webhook.success_code.clone()))
                    .unwrap_or_else(|| defaults::SUCCESS_CODE.to_string());
                if success_code.trim().is_empty() {
                    return Err(ConfigError::InvalidSuccessCode);
                }

                Action::Webhook(WebhookSettings {
                    kind: (*kind).into(),
                    file: file.clone(),
                    success_code,
                })
            }
        };

        Ok(Self {
            action,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_provider(
        args: &AuthenticateArgs,
        section: Option<&ProviderSection>,
    ) -> Result<ProviderSettings, ConfigError> {
        let provider = args.provider;

        // Priority: CLI explicit > TOML > default
        let endpoint = args
            .endpoint
            .as_deref()
            .or_else(|| section.and_then(|s| s.endpoint.as_deref()))
            .unwrap_or(defaults::endpoint(provider));
        let endpoint = Url::parse(endpoint).map_err(|e| ConfigError::InvalidUrl {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let key = resolve_credential(args.key.as_deref(), section.and_then(|s| s.key.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::KEY,
                    format!("Use --key or set {provider}.key in config file"),
                )
            })?;
        let secret =
            resolve_credential(args.secret.as_deref(), section.and_then(|s| s.secret.as_deref()))
                .ok_or_else(|| {
                    ConfigError::missing(
                        field::SECRET,
                        format!("Use --secret or set {provider}.secret in config file"),
                    )
                })?;

        let seconds = args
            .timeout
            .or_else(|| section.and_then(|s| s.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);
        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        let log_level = args
            .log_level
            .as_deref()
            .or_else(|| section.and_then(|s| s.log_level.as_deref()))
            .unwrap_or(defaults::LOG_LEVEL)
            .parse::<LogLevel>()
            .map_err(ConfigError::InvalidLogLevel)?;

        Ok(ProviderSettings {
            provider,
            endpoint,
            key,
            secret,
            timeout: Duration::from_secs(seconds),
            log_level,
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn resolve_credential(cli: Option<&str>, toml: Option<&str>) -> Option<String> {
    present(cli).or_else(|| present(toml)).map(str::to_string)
}

// Blank values count as missing.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;
use super::cli::ProviderArg;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Safaricom Daraja credentials
    #[serde(default)]
    pub daraja: ProviderSection,

    /// Quikk credentials
    #[serde(default)]
    pub quikk: ProviderSection,

    /// Tanda credentials
    #[serde(default)]
    pub tanda: ProviderSection,

    /// Webhook dispatch configuration
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// Per-provider configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    /// Base URL
    pub endpoint: Option<String>,

    /// Consumer key, client id or API key
    pub key: Option<String>,

    /// Consumer secret, client secret or API secret
    pub secret: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// Request logging: "off", "debug" or "debug_with_body"
    pub log_level: Option<String>,
}

/// Webhook dispatch configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// `meta.code` value that means success
    pub success_code: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Returns the section of `provider`.
    #[must_use]
    pub const fn provider(&self, provider: ProviderArg) -> &ProviderSection {
        match provider {
            ProviderArg::Daraja => &self.daraja,
            ProviderArg::Quikk => &self.quikk,
            ProviderArg::Tanda => &self.tanda,
        }
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Payments Configuration File
#
# Each provider section is optional. CLI flags override these values.

[daraja]
# Base URL (default: sandbox)
# endpoint = "https://api.safaricom.co.ke"

# Consumer key and secret from the Daraja portal (required to authenticate)
# key = "your-consumer-key"
# secret = "your-consumer-secret"

# Request timeout in seconds (default: 5)
# timeout = 5

# Request logging: "off", "debug" or "debug_with_body" (default: off)
# log_level = "off"

[quikk]
# endpoint = "https://api.quikk.dev"
# key = "your-api-key"
# secret = "your-api-secret"
# timeout = 5
# log_level = "off"

[tanda]
# endpoint = "https://io-proxy-443.tanda.co.ke"
# key = "your-client-id"
# secret = "your-client-secret"
# timeout = 5
# log_level = "off"

[webhook]
# meta.code value of a successful Quikk webhook (default: "200")
# success_code = "200"
"#
    .to_string()
}

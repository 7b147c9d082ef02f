//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Mobile-money gateway client.
///
/// Fetches access tokens from Daraja and Tanda, verifies Quikk
/// credentials, and dispatches Quikk webhooks captured to a file.
#[derive(Debug, Parser)]
#[command(name = "payments")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for payments
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "payments.toml")]
        output: PathBuf,
    },

    /// Authenticate against a provider and print the result
    ///
    /// Daraja and Tanda print a fresh access token; Quikk prints the
    /// answer of its credential check.
    Authenticate(AuthenticateArgs),

    /// Decode a Quikk webhook body from a file and print its outcome
    Webhook {
        /// Operation the webhook reports on
        #[arg(long, short, value_enum)]
        kind: WebhookKindArg,

        /// `meta.code` value that means success
        #[arg(long = "success-code")]
        success_code: Option<String>,

        /// File holding the raw webhook body
        file: PathBuf,
    },
}

/// Arguments of the authenticate subcommand
#[derive(Debug, Args)]
pub struct AuthenticateArgs {
    /// Provider to authenticate against
    #[arg(long, short, value_enum)]
    pub provider: ProviderArg,

    /// Base URL (default: the provider's sandbox)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Consumer key, client id or API key
    #[arg(long)]
    pub key: Option<String>,

    /// Consumer secret, client secret or API secret
    #[arg(long)]
    pub secret: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Request logging: off, debug or `debug_with_body`
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}

/// Provider argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    /// Safaricom Daraja
    Daraja,
    /// Quikk
    Quikk,
    /// Tanda
    Tanda,
}

impl ProviderArg {
    /// Returns the config file section of this provider.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daraja => "daraja",
            Self::Quikk => "quikk",
            Self::Tanda => "tanda",
        }
    }
}

impl fmt::Display for ProviderArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Webhook kind argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WebhookKindArg {
    Charge,
    Payout,
    Transfer,
    Search,
}

impl From<WebhookKindArg> for crate::providers::quikk::WebhookKind {
    fn from(arg: WebhookKindArg) -> Self {
        match arg {
            WebhookKindArg::Charge => Self::Charge,
            WebhookKindArg::Payout => Self::Payout,
            WebhookKindArg::Transfer => Self::Transfer,
            WebhookKindArg::Search => Self::Search,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}

//! Configuration layer for the `payments` binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the provider's section
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Credentials (`key`, `secret`) have no default. A blank value counts as
//! missing, so an empty CLI flag falls through to the config file.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{AuthenticateArgs, Cli, Command, ProviderArg, WebhookKindArg};
pub use error::{ConfigError, field};
pub use toml::{ProviderSection, TomlConfig, WebhookSection, default_config_template};
pub use validated::{
    Action, ProviderSettings, ValidatedConfig, WebhookSettings, write_default_config,
};

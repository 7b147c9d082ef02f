//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use crate::providers::{DEFAULT_TIMEOUT, daraja, quikk, tanda};

use super::cli::ProviderArg;

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT.as_secs();

/// Default request log level.
pub const LOG_LEVEL: &str = "off";

/// Default `meta.code` of a successful Quikk webhook.
pub const SUCCESS_CODE: &str = quikk::RESULT_CODE_SUCCESS;

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Sandbox host of `provider`, used when no endpoint is configured.
#[must_use]
pub const fn endpoint(provider: ProviderArg) -> &'static str {
    match provider {
        ProviderArg::Daraja => daraja::SANDBOX_URL,
        ProviderArg::Quikk => quikk::SANDBOX_URL,
        ProviderArg::Tanda => tanda::SANDBOX_URL,
    }
}

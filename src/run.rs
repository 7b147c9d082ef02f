//! Subcommand execution.
//!
//! Each subcommand produces a JSON document that `main` prints to stdout.

use std::path::PathBuf;

use serde_json::{Value, json};
use thiserror::Error;

use payments::config::{ProviderArg, ProviderSettings, WebhookSettings};
use payments::pipeline::{self, Context};
use payments::providers::quikk::{WebhookError, WebhookProcessor};
use payments::providers::{daraja, quikk, tanda};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// A provider call failed.
    #[error(transparent)]
    Pipeline(#[from] pipeline::Error),

    /// The webhook body could not be dispatched.
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    /// Failed to read the webhook body.
    #[error("Failed to read '{}': {source}", path.display())]
    ReadBody {
        /// Path of the body file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to render the result.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

/// Authenticates against the configured provider.
///
/// Daraja and Tanda yield the token response; Quikk yields whatever its
/// credential check answered.
///
/// # Errors
///
/// Returns [`RunError::Pipeline`] if the provider call fails.
pub async fn authenticate(settings: &ProviderSettings, context: Context) -> Result<Value, RunError> {
    let config = settings.client_config();
    tracing::info!(provider = %settings.provider, endpoint = %config.endpoint, "authenticating");

    let output = match settings.provider {
        ProviderArg::Daraja => {
            let response = daraja::Client::new(&config)?
                .authentication_request(&settings.key, &settings.secret)
                .send(&context)
                .await?;
            json!({
                "access_token": response.access_token,
                "expires_in": response.expires_in,
            })
        }
        ProviderArg::Tanda => {
            let response = tanda::Client::new(&config)?
                .authentication_request(&settings.key, &settings.secret)
                .send(&context)
                .await?;
            json!({
                "access_token": response.access_token,
                "token_type": response.token_type,
                "expires_in": response.expires_in,
            })
        }
        ProviderArg::Quikk => {
            quikk::Client::new(&config)?
                .with_credentials(&settings.key, &settings.secret)
                .verify_auth(context)
                .await?
        }
    };

    Ok(json!({ "provider": settings.provider.as_str(), "result": output }))
}

/// Reads a webhook body from disk and dispatches it.
///
/// # Errors
///
/// Returns [`RunError::ReadBody`] if the file cannot be read, or
/// [`RunError::Webhook`] if the body does not match the kind.
pub fn dispatch_webhook(settings: &WebhookSettings) -> Result<Value, RunError> {
    let raw = std::fs::read(&settings.file).map_err(|source| RunError::ReadBody {
        path: settings.file.clone(),
        source,
    })?;

    let processed = WebhookProcessor::new()
        .with_success_code(settings.success_code.clone())
        .process(&raw, settings.kind)?;

    Ok(serde_json::to_value(processed)?)
}

/// Returns a context cancelled on Ctrl+C.
///
/// Excluded from coverage - requires signal handling.
#[cfg(not(tarpaulin_include))]
pub fn interruptible() -> Context {
    let context = Context::background();
    let handle = context.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling request");
            handle.cancel();
        }
    });
    context
}

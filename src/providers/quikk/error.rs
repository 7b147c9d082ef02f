//! Error types for webhook dispatch.

use thiserror::Error;

use super::webhook::WebhookKind;

/// Error returned when a webhook cannot be dispatched.
///
/// A known but incomplete webhook is not an error; see
/// [`WebhookProcessor::process`](super::WebhookProcessor::process).
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The discriminator names no known webhook shape.
    #[error("Unknown webhook kind '{0}': expected charge, payout, transfer or search")]
    UnknownKind(String),

    /// The body does not have the shape its discriminator requires.
    #[error("Failed to decode {kind} webhook: {source}")]
    Decode {
        /// The kind the body was decoded as
        kind: WebhookKind,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

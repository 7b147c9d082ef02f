//! Error taxonomy for pipeline execution.

use serde::Deserialize;
use thiserror::Error;

use crate::transport::HttpError;

/// Error returned by [`Request::send`](super::Request::send).
///
/// Every stage short-circuits on the first error, so a call yields either
/// a populated output or exactly one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint and operation path do not form a valid URL.
    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint {
        /// The URL that failed to parse
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A build hook tried to set a header that is not valid HTTP.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The request payload could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The nested authentication call failed; no request was sent.
    #[error("Authentication failed: {0}")]
    Authentication(#[source] Box<Error>),

    /// The transport call failed.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The request context was cancelled before the call completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The request context deadline passed before the call completed.
    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    /// An unmarshal hook ran without a response to read.
    #[error("No response available to unmarshal")]
    MissingResponse,

    /// The provider rejected the request with a structured error body.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The response body could not be decoded.
    #[error("Failed to decode response (status {status}): {source}")]
    Decode {
        /// Status of the response whose body was malformed
        status: http::StatusCode,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Returns the provider's structured error, if that is what this is.
    ///
    /// Looks through [`Error::Authentication`], so a rejected token request
    /// still exposes the provider code.
    #[must_use]
    pub fn provider(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(e) => Some(e),
            Self::Authentication(inner) => inner.provider(),
            _ => None,
        }
    }

    /// Returns true if the call never produced a response
    /// (network failure, cancellation or deadline).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Cancelled | Self::DeadlineExceeded
        )
    }
}

/// Structured error body returned by a provider on non-success status.
///
/// Wire shape: `{"requestId": "...", "errorCode": "...", "errorMessage": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Deserialize)]
#[error("<{code}> {message}")]
pub struct ProviderError {
    /// Provider-specific error code
    #[serde(rename = "errorCode")]
    pub code: String,
    /// Human-readable message
    #[serde(rename = "errorMessage")]
    pub message: String,
    /// Correlation id some providers attach
    #[serde(rename = "requestId", default)]
    pub request_id: Option<String>,
}

impl ProviderError {
    /// Creates a provider error without a request id.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            request_id: None,
        }
    }
}

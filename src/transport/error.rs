//! Error types for the transport call.

use thiserror::Error;

/// Error type for a failed transport call.
///
/// Describes what went wrong on the wire. The pipeline never retries
/// these; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures and a body that could not be read to the end.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The transport client's own timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

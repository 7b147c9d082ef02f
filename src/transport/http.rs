//! HTTP request/response types and client trait.

use std::borrow::Cow;

use async_trait::async_trait;

use super::HttpError;

/// An HTTP request to be sent.
///
/// This is the outgoing half of an in-flight pipeline request. Build
/// hooks mutate it in place; the send hook hands a copy to an
/// [`HttpClient`]. It uses standard `http` crate types for method and
/// headers.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a new HTTP request with the given method and URL.
    ///
    /// Headers are initialized to an empty map and body is `None`.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Returns the body as text for logging; invalid UTF-8 is replaced.
    #[must_use]
    pub fn body_lossy(&self) -> Cow<'_, str> {
        self.body
            .as_deref()
            .map_or(Cow::Borrowed(""), String::from_utf8_lossy)
    }
}

/// An HTTP response received from a provider.
///
/// The body is fully buffered so that several unmarshal hooks can
/// read it in turn.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns true if the body is empty or only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Returns the body as text for logging; invalid UTF-8 is replaced.
    #[must_use]
    pub fn body_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Trait for making HTTP requests.
///
/// # Design
///
/// Requests carry their transport as `Arc<dyn HttpClient>` so a build
/// hook can swap it per call (the authentication call, for example,
/// uses a client with a longer timeout). `async_trait` keeps it object
/// safe.
///
/// # Example
///
/// ```ignore
/// use payments::transport::{HttpClient, HttpRequest, HttpResponse, HttpError};
///
/// struct MockClient {
///     response: HttpResponse,
/// }
///
/// #[async_trait::async_trait]
/// impl HttpClient for MockClient {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.response.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync + std::fmt::Debug {
    /// Sends an HTTP request and returns the buffered response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when:
    /// - Network connection fails ([`HttpError::Connection`])
    /// - Request times out ([`HttpError::Timeout`])
    /// - URL is invalid ([`HttpError::InvalidUrl`])
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

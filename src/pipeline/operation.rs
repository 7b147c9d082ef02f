//! Operation descriptors.

use std::borrow::Cow;

/// Immutable description of one provider API call.
///
/// Created per call and never mutated; the path is appended to the
/// client's endpoint when the [`Request`](super::Request) is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Operation name, used for log spans
    pub name: Cow<'static, str>,
    /// HTTP method
    pub method: http::Method,
    /// Path (and optional query) relative to the endpoint
    pub path: String,
}

impl Operation {
    /// Creates an operation descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        method: http::Method,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
        }
    }

    /// Creates a GET operation.
    #[must_use]
    pub fn get(name: impl Into<Cow<'static, str>>, path: impl Into<String>) -> Self {
        Self::new(name, http::Method::GET, path)
    }

    /// Creates a POST operation.
    #[must_use]
    pub fn post(name: impl Into<Cow<'static, str>>, path: impl Into<String>) -> Self {
        Self::new(name, http::Method::POST, path)
    }
}

//! Transport layer: the single outbound HTTP call a pipeline makes.
//!
//! This module provides types and traits for:
//! - Describing outgoing requests ([`HttpRequest`])
//! - Buffered responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])

mod client;
mod error;
mod http;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod http_tests;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
